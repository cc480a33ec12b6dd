// src/domain/mod.rs
//
// Domain root: entities and value objects.
// All other modules import from `crate::domain::*`

pub mod anime;
pub mod samples;
pub mod watch_list;

pub use anime::{Anime, AnimeFormat, AnimeStatus, UNKNOWN_TITLE};
pub use watch_list::WatchList;
