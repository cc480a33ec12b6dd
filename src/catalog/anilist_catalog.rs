// src/catalog/anilist_catalog.rs
//
// Remote catalog backed by the AniList GraphQL API

use std::sync::Arc;

use async_trait::async_trait;

use super::CatalogSource;
use crate::domain::Anime;
use crate::error::AppResult;
use crate::integrations::AniListClient;

pub struct AniListCatalog {
    client: Arc<AniListClient>,
}

impl AniListCatalog {
    pub fn new(client: Arc<AniListClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogSource for AniListCatalog {
    /// Title hits plus popular titles of every genre whose name contains the
    /// query; the caller's predicate narrows them to the shared matching rules.
    /// Candidates are capped at one result page per request.
    async fn fetch(&self, query: &str) -> AppResult<Vec<Anime>> {
        self.client.search_anime(query).await
    }

    fn name(&self) -> &'static str {
        "anilist"
    }
}
