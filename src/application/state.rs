// src/application/state.rs

use std::sync::Arc;

use crate::repositories::AnimeRepository;
use crate::services::SearchSession;

/// Everything a UI layer needs, built once at startup and passed down.
/// All fields are Arc-wrapped for sharing across screens and tasks.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn AnimeRepository>,
    pub search: Arc<SearchSession>,
}

impl AppState {
    pub fn new(repository: Arc<dyn AnimeRepository>) -> Self {
        let search = Arc::new(SearchSession::new(Arc::clone(&repository)));
        Self { repository, search }
    }
}
