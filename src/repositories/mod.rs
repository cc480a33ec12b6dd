// src/repositories/mod.rs
//
// Repository layer: the single contract the UI layer queries and mutates
// through.
//
// RULES:
// - Reads return snapshot copies, never live views
// - Adds and removes are idempotent by anime id
// - Each call fully succeeds or fully fails
// - Backend failures always surface as a typed AppError

pub mod memory_repository;
pub mod sqlite_repository;


use async_trait::async_trait;

use crate::domain::{Anime, WatchList};
use crate::error::AppResult;

pub use memory_repository::InMemoryAnimeRepository;
pub use sqlite_repository::SqliteAnimeRepository;

/// Catalog search plus the three watch lists.
///
/// Implementors supply the four list-generic operations; the named
/// per-list operations are provided on top of them.
#[async_trait]
pub trait AnimeRepository: Send + Sync {
    /// Case-insensitive substring search over English title, Romaji title
    /// and genres. An empty query returns the full catalog.
    async fn search(&self, query: &str) -> AppResult<Vec<Anime>>;

    /// Snapshot of `list` in insertion order
    async fn list(&self, list: WatchList) -> AppResult<Vec<Anime>>;

    /// Append `anime` to `list` unless its id is already present
    async fn add(&self, list: WatchList, anime: &Anime) -> AppResult<()>;

    /// Drop every entry of `list` with the id of `anime`; absent ids are a no-op
    async fn remove(&self, list: WatchList, anime: &Anime) -> AppResult<()>;

    async fn list_watching(&self) -> AppResult<Vec<Anime>> {
        self.list(WatchList::Watching).await
    }

    async fn list_watched(&self) -> AppResult<Vec<Anime>> {
        self.list(WatchList::Watched).await
    }

    async fn list_to_watch(&self) -> AppResult<Vec<Anime>> {
        self.list(WatchList::ToWatch).await
    }

    async fn add_to_watching(&self, anime: &Anime) -> AppResult<()> {
        self.add(WatchList::Watching, anime).await
    }

    async fn add_to_watched(&self, anime: &Anime) -> AppResult<()> {
        self.add(WatchList::Watched, anime).await
    }

    async fn add_to_to_watch(&self, anime: &Anime) -> AppResult<()> {
        self.add(WatchList::ToWatch, anime).await
    }

    async fn remove_from_watching(&self, anime: &Anime) -> AppResult<()> {
        self.remove(WatchList::Watching, anime).await
    }

    async fn remove_from_watched(&self, anime: &Anime) -> AppResult<()> {
        self.remove(WatchList::Watched, anime).await
    }

    async fn remove_from_to_watch(&self, anime: &Anime) -> AppResult<()> {
        self.remove(WatchList::ToWatch, anime).await
    }
}
