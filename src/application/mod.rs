// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary a UI layer talks to
// - Builds the dependency graph once, from configuration
// - Translates errors into UI-safe responses

pub mod bootstrap;
pub mod error_handling;
pub mod state;

pub use bootstrap::{build_app_state, build_catalog, build_repository};
pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;
