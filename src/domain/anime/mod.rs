pub mod entity;

pub use entity::{Anime, AnimeFormat, AnimeStatus, UNKNOWN_TITLE};
