// src/services/search_session.rs
//
// Caller-side search state with last-request-wins semantics.
//
// Every request takes a generation number when it is issued. A result is
// applied to the displayed state only while its generation is still the
// newest one issued; anything older is reported as superseded and dropped.
// `spawn_search` additionally aborts the previous in-flight task, so a
// cancelled search never runs to completion.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::{AbortHandle, JoinHandle};

use crate::domain::Anime;
use crate::error::AppResult;
use crate::repositories::AnimeRepository;

/// What happened to a finished search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The result replaced the displayed state
    Applied { generation: u64, count: usize },
    /// A newer request was issued first; the result was discarded
    Superseded { generation: u64 },
}

/// The result set currently shown to the user
#[derive(Debug, Clone, Default)]
pub struct DisplayedResults {
    /// Generation of the request that produced this state (0 = none yet)
    pub generation: u64,
    pub query: String,
    pub results: Vec<Anime>,
}

pub struct SearchSession {
    repository: Arc<dyn AnimeRepository>,
    latest_generation: AtomicU64,
    displayed: Mutex<DisplayedResults>,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl SearchSession {
    pub fn new(repository: Arc<dyn AnimeRepository>) -> Self {
        Self {
            repository,
            latest_generation: AtomicU64::new(0),
            displayed: Mutex::new(DisplayedResults::default()),
            in_flight: Mutex::new(None),
        }
    }

    /// Issue a search and wait for it.
    ///
    /// On failure of a current request the displayed results are cleared and
    /// the error is returned. Failures of superseded requests are swallowed
    /// since nobody is waiting for their state any more.
    pub async fn search(&self, query: &str) -> AppResult<SearchOutcome> {
        let generation = self.begin();
        self.run(generation, query).await
    }

    /// Issue a search on a background task, aborting the previous one.
    pub fn spawn_search(
        self: &Arc<Self>,
        query: impl Into<String>,
    ) -> JoinHandle<AppResult<SearchOutcome>> {
        let query = query.into();

        // Generation, spawn and swap happen under one lock, so the handle
        // left in flight always belongs to the newest generation
        let mut in_flight = lock(&self.in_flight);
        let generation = self.begin();

        let session = Arc::clone(self);
        let handle = tokio::spawn(async move { session.run(generation, &query).await });

        if let Some(previous) = in_flight.replace(handle.abort_handle()) {
            previous.abort();
        }
        handle
    }

    /// Copy of the displayed state
    pub fn displayed(&self) -> DisplayedResults {
        lock(&self.displayed).clone()
    }

    pub fn results(&self) -> Vec<Anime> {
        lock(&self.displayed).results.clone()
    }

    fn begin(&self) -> u64 {
        self.latest_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.latest_generation.load(Ordering::SeqCst) == generation
    }

    async fn run(&self, generation: u64, query: &str) -> AppResult<SearchOutcome> {
        let result = self.repository.search(query).await;

        // Check and apply under one lock so an older result can never land
        // after a newer one
        let mut displayed = lock(&self.displayed);
        if !self.is_current(generation) || displayed.generation > generation {
            log::debug!("search #{} '{}' superseded", generation, query);
            return Ok(SearchOutcome::Superseded { generation });
        }

        displayed.generation = generation;
        displayed.query = query.to_string();

        match result {
            Ok(results) => {
                let count = results.len();
                displayed.results = results;
                Ok(SearchOutcome::Applied { generation, count })
            }
            Err(e) => {
                log::warn!("search #{} '{}' failed: {}", generation, query, e);
                displayed.results.clear();
                Err(e)
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
