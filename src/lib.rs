// src/lib.rs
// AnimeCompanion - watch-state tracking core
//
// Architecture:
// - Domain: the Anime record and the watch lists
// - Catalog: where searchable records come from (static, JSON file, AniList)
// - Repositories: the async contract the UI layer calls, in-memory and SQLite
// - Services: caller-side policies (last-request-wins search)
// - Application: dependency wiring and UI-safe error mapping

pub mod application;
pub mod catalog;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod integrations;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{Anime, AnimeFormat, AnimeStatus, WatchList, UNKNOWN_TITLE};

// ============================================================================
// PUBLIC API - Errors
// ============================================================================

pub use error::{AppError, AppResult, ErrorKind};

// ============================================================================
// PUBLIC API - Catalog & Repositories
// ============================================================================

pub use catalog::{search_catalog, AniListCatalog, CatalogSource, StaticCatalog};
pub use repositories::{AnimeRepository, InMemoryAnimeRepository, SqliteAnimeRepository};

// ============================================================================
// PUBLIC API - Services, Application, Config
// ============================================================================

pub use application::{build_app_state, build_repository, AppState, ErrorResponse};
pub use config::AppConfig;
pub use integrations::AniListClient;
pub use services::{SearchOutcome, SearchSession};
