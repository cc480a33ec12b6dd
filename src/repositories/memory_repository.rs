// src/repositories/memory_repository.rs
//
// In-memory repository (tests, offline/demo mode).
// State lives as long as the repository value.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::AnimeRepository;
use crate::catalog::{search_catalog, CatalogSource, StaticCatalog};
use crate::domain::{samples, Anime, WatchList};
use crate::error::AppResult;

/// Each list sits behind its own lock so mutations on one list never wait on
/// another, and an add holds the write lock across the membership check and
/// the append.
pub struct InMemoryAnimeRepository {
    catalog: Arc<dyn CatalogSource>,
    watching: RwLock<Vec<Anime>>,
    watched: RwLock<Vec<Anime>>,
    to_watch: RwLock<Vec<Anime>>,
}

impl InMemoryAnimeRepository {
    /// Empty lists over the given catalog
    pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
        Self {
            catalog,
            watching: RwLock::new(Vec::new()),
            watched: RwLock::new(Vec::new()),
            to_watch: RwLock::new(Vec::new()),
        }
    }

    /// Sample catalog with one sample record seeded into each list
    pub fn with_samples() -> Self {
        Self::new(Arc::new(StaticCatalog::samples()))
            .with_list(WatchList::Watching, vec![samples::attack_on_titan()])
            .with_list(WatchList::Watched, vec![samples::demon_slayer()])
            .with_list(WatchList::ToWatch, vec![samples::spirited_away()])
    }

    /// Seed `list` at construction. Later duplicates of an id are dropped.
    pub fn with_list(mut self, list: WatchList, items: Vec<Anime>) -> Self {
        let entries = self.slot_mut(list);
        entries.clear();
        for anime in items {
            if !entries.iter().any(|existing| existing.id == anime.id) {
                entries.push(anime);
            }
        }
        self
    }

    fn slot(&self, list: WatchList) -> &RwLock<Vec<Anime>> {
        match list {
            WatchList::Watching => &self.watching,
            WatchList::Watched => &self.watched,
            WatchList::ToWatch => &self.to_watch,
        }
    }

    fn slot_mut(&mut self, list: WatchList) -> &mut Vec<Anime> {
        match list {
            WatchList::Watching => self.watching.get_mut(),
            WatchList::Watched => self.watched.get_mut(),
            WatchList::ToWatch => self.to_watch.get_mut(),
        }
    }
}

impl Default for InMemoryAnimeRepository {
    fn default() -> Self {
        Self::new(Arc::new(StaticCatalog::default()))
    }
}

#[async_trait]
impl AnimeRepository for InMemoryAnimeRepository {
    async fn search(&self, query: &str) -> AppResult<Vec<Anime>> {
        search_catalog(self.catalog.as_ref(), query).await
    }

    async fn list(&self, list: WatchList) -> AppResult<Vec<Anime>> {
        let entries = self.slot(list).read().await;
        log::debug!("list {}: {} entr(ies)", list, entries.len());
        Ok(entries.clone())
    }

    async fn add(&self, list: WatchList, anime: &Anime) -> AppResult<()> {
        let mut entries = self.slot(list).write().await;
        if entries.iter().any(|existing| existing.id == anime.id) {
            log::debug!("anime {} already in {}", anime.id, list);
            return Ok(());
        }

        entries.push(anime.clone());
        log::info!("added anime {} ({}) to {}", anime.id, anime, list);
        Ok(())
    }

    async fn remove(&self, list: WatchList, anime: &Anime) -> AppResult<()> {
        let mut entries = self.slot(list).write().await;
        let before = entries.len();
        entries.retain(|existing| existing.id != anime.id);

        if entries.len() != before {
            log::info!("removed anime {} from {}", anime.id, list);
        }
        Ok(())
    }
}
