// src/application/bootstrap.rs
//
// Backend selection. The only place that knows which concrete repository
// and catalog are in use; everything downstream sees the traits.

use std::sync::Arc;

use crate::catalog::{AniListCatalog, CatalogSource, StaticCatalog};
use crate::config::{AppConfig, CatalogBackend, StorageBackend};
use crate::error::AppResult;
use crate::integrations::AniListClient;
use crate::repositories::{AnimeRepository, InMemoryAnimeRepository, SqliteAnimeRepository};

use super::AppState;

pub fn build_catalog(config: &AppConfig) -> AppResult<Arc<dyn CatalogSource>> {
    let catalog: Arc<dyn CatalogSource> = match &config.catalog {
        CatalogBackend::Samples => Arc::new(StaticCatalog::samples()),
        CatalogBackend::JsonFile(path) => Arc::new(StaticCatalog::from_json_file(path)?),
        CatalogBackend::AniList => {
            let mut client = AniListClient::new()?;
            if let Some(token) = &config.anilist_token {
                client = client.with_auth(token.clone());
            }
            Arc::new(AniListCatalog::new(Arc::new(client)))
        }
    };
    Ok(catalog)
}

pub fn build_repository(config: &AppConfig) -> AppResult<Arc<dyn AnimeRepository>> {
    let catalog = build_catalog(config)?;

    let repository: Arc<dyn AnimeRepository> = match &config.storage {
        StorageBackend::Memory => {
            log::info!("Using in-memory watch lists, {} catalog", catalog.name());
            if config.catalog == CatalogBackend::Samples {
                Arc::new(InMemoryAnimeRepository::with_samples())
            } else {
                Arc::new(InMemoryAnimeRepository::new(catalog))
            }
        }
        StorageBackend::Sqlite(path) => {
            log::info!(
                "Using SQLite watch lists at {}, {} catalog",
                path.display(),
                catalog.name()
            );
            Arc::new(SqliteAnimeRepository::open(path, catalog)?)
        }
    };
    Ok(repository)
}

pub fn build_app_state(config: &AppConfig) -> AppResult<AppState> {
    Ok(AppState::new(build_repository(config)?))
}
