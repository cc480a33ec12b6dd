// src/catalog/mod.rs
//
// Catalog sources: where searchable records come from.
//
// A source only supplies candidates. `search_catalog` applies the matching
// rules, so every backend filters identically whether it is a fixed list or
// a remote API that already did its own fuzzy search.

pub mod anilist_catalog;
pub mod static_catalog;

use async_trait::async_trait;

use crate::domain::Anime;
use crate::error::AppResult;

pub use anilist_catalog::AniListCatalog;
pub use static_catalog::StaticCatalog;

#[cfg(test)]
use mockall::automock;

/// Supplier of candidate records for a query
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Return every record that might match `query`.
    ///
    /// For an empty query this is the full catalog the source can offer.
    /// Sources may over-approximate; they must not drop true matches they hold.
    async fn fetch(&self, query: &str) -> AppResult<Vec<Anime>>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Run a search against a source.
///
/// Empty query: the source's full candidate set, unfiltered.
/// Otherwise: only records whose English title, Romaji title or any genre
/// contains the query, case-insensitively.
pub async fn search_catalog(source: &dyn CatalogSource, query: &str) -> AppResult<Vec<Anime>> {
    let candidates = source.fetch(query).await?;
    if query.is_empty() {
        return Ok(candidates);
    }

    let results: Vec<Anime> = candidates
        .into_iter()
        .filter(|anime| anime.matches_query(query))
        .collect();

    log::debug!(
        "search '{}' on {} catalog: {} match(es)",
        query,
        source.name(),
        results.len()
    );
    Ok(results)
}
