// src/services/mod.rs
//
// Services Module - caller-side orchestration over the repository

pub mod search_session;

pub use search_session::{DisplayedResults, SearchOutcome, SearchSession};
