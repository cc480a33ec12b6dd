// src/config.rs
//
// Runtime configuration, read from the environment (and `.env` if present).
//
//   ANIME_COMPANION_STORAGE   memory (default) | sqlite
//   ANIME_COMPANION_DB_PATH   SQLite file, defaults to the app data dir
//   ANIME_COMPANION_CATALOG   samples (default) | anilist | <path to JSON>
//   ANILIST_TOKEN             optional bearer token

use std::path::PathBuf;

use crate::db::default_database_path;
use crate::error::{AppError, AppResult};

pub const STORAGE_VAR: &str = "ANIME_COMPANION_STORAGE";
pub const DB_PATH_VAR: &str = "ANIME_COMPANION_DB_PATH";
pub const CATALOG_VAR: &str = "ANIME_COMPANION_CATALOG";
pub const ANILIST_TOKEN_VAR: &str = "ANILIST_TOKEN";

/// Where the watch lists live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Sqlite(PathBuf),
}

/// Where searchable records come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogBackend {
    Samples,
    AniList,
    JsonFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub storage: StorageBackend,
    pub catalog: CatalogBackend,
    pub anilist_token: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::Memory,
            catalog: CatalogBackend::Samples,
            anilist_token: None,
        }
    }
}

impl AppConfig {
    /// Load `.env` (if any) and read the process environment
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let storage = match get(STORAGE_VAR).as_deref().map(str::trim) {
            None | Some("memory") => StorageBackend::Memory,
            Some("sqlite") => {
                let path = match get(DB_PATH_VAR) {
                    Some(path) => PathBuf::from(path),
                    None => default_database_path()?,
                };
                StorageBackend::Sqlite(path)
            }
            Some(other) => {
                return Err(AppError::InvalidInput(format!(
                    "{} must be 'memory' or 'sqlite', got '{}'",
                    STORAGE_VAR, other
                )))
            }
        };

        let catalog = match get(CATALOG_VAR) {
            None => CatalogBackend::Samples,
            Some(value) => match value.trim() {
                "samples" => CatalogBackend::Samples,
                "anilist" => CatalogBackend::AniList,
                path if path.ends_with(".json") => CatalogBackend::JsonFile(PathBuf::from(path)),
                other => {
                    return Err(AppError::InvalidInput(format!(
                        "{} must be 'samples', 'anilist' or a .json file, got '{}'",
                        CATALOG_VAR, other
                    )))
                }
            },
        };

        Ok(Self {
            storage,
            catalog,
            anilist_token: get(ANILIST_TOKEN_VAR),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppResult<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config_from(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_sqlite_with_explicit_path() {
        let config = config_from(&[
            (STORAGE_VAR, "sqlite"),
            (DB_PATH_VAR, "/tmp/lists.db"),
            (CATALOG_VAR, "anilist"),
            (ANILIST_TOKEN_VAR, "secret"),
        ])
        .unwrap();

        assert_eq!(config.storage, StorageBackend::Sqlite(PathBuf::from("/tmp/lists.db")));
        assert_eq!(config.catalog, CatalogBackend::AniList);
        assert_eq!(config.anilist_token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_json_catalog_path() {
        let config = config_from(&[(CATALOG_VAR, "data/anime.json")]).unwrap();
        assert_eq!(
            config.catalog,
            CatalogBackend::JsonFile(PathBuf::from("data/anime.json"))
        );
    }

    #[test]
    fn test_unknown_values_are_invalid_input() {
        let err = config_from(&[(STORAGE_VAR, "firebase")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = config_from(&[(CATALOG_VAR, "mal")]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = config_from(&[(STORAGE_VAR, "  "), (ANILIST_TOKEN_VAR, "")]).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
