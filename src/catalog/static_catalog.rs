// src/catalog/static_catalog.rs
//
// Fixed, in-process catalog (offline mode, demos, tests)

use std::path::Path;

use async_trait::async_trait;

use super::CatalogSource;
use crate::domain::{samples, Anime};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    records: Vec<Anime>,
}

impl StaticCatalog {
    pub fn new(records: Vec<Anime>) -> Self {
        Self { records }
    }

    /// The bundled example records
    pub fn samples() -> Self {
        Self::new(samples::sample_catalog())
    }

    /// Load a JSON array of records (camelCase fields)
    pub fn from_json_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                AppError::NotFound(format!("catalog file {}", path.display()))
            }
            _ => AppError::Io(e),
        })?;
        let records: Vec<Anime> = serde_json::from_str(&raw)?;

        log::info!(
            "Loaded {} catalog record(s) from {}",
            records.len(),
            path.display()
        );
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch(&self, _query: &str) -> AppResult<Vec<Anime>> {
        Ok(self.records.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::search_catalog;
    use crate::error::ErrorKind;
    use std::io::Write;

    #[tokio::test]
    async fn test_search_titles_and_genres() {
        let catalog = StaticCatalog::samples();

        let by_title = search_catalog(&catalog, "attack").await.unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, 1);

        let by_romaji = search_catalog(&catalog, "CHIHIRO").await.unwrap();
        assert_eq!(by_romaji.len(), 1);
        assert_eq!(by_romaji[0].id, 3);

        // Demon Slayer and Spirited Away both carry "Supernatural"
        let by_genre = search_catalog(&catalog, "supernat").await.unwrap();
        let ids: Vec<i64> = by_genre.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3]);

        let none = search_catalog(&catalog, "mecha").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_returns_full_catalog() {
        let catalog = StaticCatalog::samples();
        let all = search_catalog(&catalog, "").await.unwrap();
        assert_eq!(all, samples::sample_catalog());
    }

    #[tokio::test]
    async fn test_search_matches_union_of_fields() {
        let catalog = StaticCatalog::samples();
        // "dra" hits the Drama genre of two records, nothing else
        let results = search_catalog(&catalog, "dra").await.unwrap();
        for anime in &results {
            assert!(anime.matches_query("dra"));
        }
        let ids: Vec<i64> = results.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&samples::sample_catalog()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = StaticCatalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_missing_json_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = StaticCatalog::from_json_file(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
