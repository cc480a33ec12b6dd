// src/repositories/sqlite_repository.rs
//
// Persisted watch lists on SQLite.
//
// - Each membership row carries its own copy of the record, like the in-memory lists
// - Rows are unique per (list, anime_id); the database enforces it
// - Blocking SQLite calls run on the blocking pool, never on async workers

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Row};

use super::AnimeRepository;
use crate::catalog::{search_catalog, CatalogSource};
use crate::db::{
    create_connection_pool, get_connection, get_database_stats, initialize_database,
    verify_database_integrity, ConnectionPool,
};
use crate::domain::{Anime, AnimeFormat, AnimeStatus, WatchList};
use crate::error::AppResult;

pub struct SqliteAnimeRepository {
    pool: Arc<ConnectionPool>,
    catalog: Arc<dyn CatalogSource>,
}

impl SqliteAnimeRepository {
    /// Wrap an existing pool. The schema must already be initialized.
    pub fn new(pool: Arc<ConnectionPool>, catalog: Arc<dyn CatalogSource>) -> Self {
        Self { pool, catalog }
    }

    /// Open (or create) the database file, bring its schema up to date and
    /// refuse to start on a corrupted file
    pub fn open(db_path: &Path, catalog: Arc<dyn CatalogSource>) -> AppResult<Self> {
        let pool = create_connection_pool(db_path)?;
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
            verify_database_integrity(&conn)?;

            let stats = get_database_stats(&conn)?;
            log::info!(
                "Opened {} ({} list entr(ies), {} bytes)",
                db_path.display(),
                stats.list_entry_count,
                stats.size_bytes
            );
        }
        Ok(Self::new(Arc::new(pool), catalog))
    }

    /// Run `op` with a pooled connection on the blocking thread pool
    async fn with_connection<T, F>(&self, op: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut rusqlite::Connection) -> AppResult<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || {
            let mut conn = get_connection(&pool)?;
            op(&mut conn)
        })
        .await?
    }

    /// Map database row to Anime - returns rusqlite::Error for query_map compatibility.
    /// Counts outside the u32 range fail with `IntegralValueOutOfRange`.
    fn row_to_anime(row: &Row) -> Result<Anime, rusqlite::Error> {
        let genres_json: String = row.get("genres")?;
        let genres: Vec<String> = serde_json::from_str(&genres_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let status: Option<String> = row.get("status")?;
        let format: Option<String> = row.get("format")?;

        Ok(Anime {
            id: row.get("anime_id")?,
            title_english: row.get("title_english")?,
            title_romaji: row.get("title_romaji")?,
            title_native: row.get("title_native")?,
            cover_image: row.get("cover_image")?,
            description: row.get("description")?,
            genres,
            episodes: row.get::<_, Option<u32>>("episodes")?,
            seasons: row.get::<_, Option<u32>>("seasons")?,
            status: status.as_deref().map(AnimeStatus::from_code),
            format: format.as_deref().map(AnimeFormat::from_code),
        })
    }
}

#[async_trait]
impl AnimeRepository for SqliteAnimeRepository {
    async fn search(&self, query: &str) -> AppResult<Vec<Anime>> {
        search_catalog(self.catalog.as_ref(), query).await
    }

    async fn list(&self, list: WatchList) -> AppResult<Vec<Anime>> {
        let animes = self
            .with_connection(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT anime_id, title_english, title_romaji, title_native,
                            cover_image, description, genres, episodes,
                            seasons, status, format
                     FROM list_entries
                     WHERE list = ?1
                     ORDER BY seq",
                )?;

                let animes: Vec<Anime> = stmt
                    .query_map(params![list.code()], Self::row_to_anime)?
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(animes)
            })
            .await?;

        log::debug!("list {}: {} entr(ies)", list, animes.len());
        Ok(animes)
    }

    async fn add(&self, list: WatchList, anime: &Anime) -> AppResult<()> {
        let anime = anime.clone();
        let id = anime.id;
        let inserted = self
            .with_connection(move |conn| {
                let genres_json = serde_json::to_string(&anime.genres)?;

                // An existing entry keeps the record it was added with
                let rows = conn.execute(
                    "INSERT OR IGNORE INTO list_entries (
                        list, anime_id, title_english, title_romaji, title_native,
                        cover_image, description, genres, episodes, seasons,
                        status, format, added_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                    params![
                        list.code(),
                        anime.id,
                        anime.title_english,
                        anime.title_romaji,
                        anime.title_native,
                        anime.cover_image,
                        anime.description,
                        genres_json,
                        anime.episodes,
                        anime.seasons,
                        anime.status.map(|s| s.code()),
                        anime.format.map(|f| f.code()),
                        Utc::now().to_rfc3339(),
                    ],
                )?;

                Ok(rows > 0)
            })
            .await?;

        if inserted {
            log::info!("added anime {} to {}", id, list);
        } else {
            log::debug!("anime {} already in {}", id, list);
        }
        Ok(())
    }

    async fn remove(&self, list: WatchList, anime: &Anime) -> AppResult<()> {
        let id = anime.id;
        let removed = self
            .with_connection(move |conn| {
                let rows = conn.execute(
                    "DELETE FROM list_entries WHERE list = ?1 AND anime_id = ?2",
                    params![list.code(), id],
                )?;
                Ok(rows)
            })
            .await?;

        if removed > 0 {
            log::info!("removed anime {} from {}", id, list);
        }
        Ok(())
    }
}
