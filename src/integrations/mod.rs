// src/integrations/mod.rs
//
// External integrations

pub mod anilist;

pub use anilist::{AniListClient, ANILIST_ENDPOINT};
