use serde::{Deserialize, Serialize};

/// Shown when a record carries no usable title at all
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// A catalog item as delivered by the data source.
///
/// Records are immutable value objects: the repository stores and returns
/// copies, and identity is the `id` assigned by the source (e.g. AniList).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anime {
    /// Source-assigned identifier, primary key
    pub id: i64,

    pub title_english: Option<String>,
    pub title_romaji: Option<String>,
    pub title_native: Option<String>,

    /// URI of the cover artwork
    pub cover_image: Option<String>,

    pub description: Option<String>,

    #[serde(default)]
    pub genres: Vec<String>,

    pub episodes: Option<u32>,
    pub seasons: Option<u32>,

    pub status: Option<AnimeStatus>,
    pub format: Option<AnimeFormat>,
}

/// Airing status, AniList codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnimeStatus {
    Finished,
    Releasing,
    NotYetReleased,
    Cancelled,
    Hiatus,
    #[serde(other)]
    Unknown,
}

/// Release format, AniList codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnimeFormat {
    Tv,
    TvShort,
    Movie,
    Special,
    Ova,
    Ona,
    Music,
    #[serde(other)]
    Unknown,
}

impl Anime {
    /// Create a record with only its identifier set
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title_english: None,
            title_romaji: None,
            title_native: None,
            cover_image: None,
            description: None,
            genres: Vec::new(),
            episodes: None,
            seasons: None,
            status: None,
            format: None,
        }
    }

    pub fn with_titles(
        mut self,
        english: Option<&str>,
        romaji: Option<&str>,
        native: Option<&str>,
    ) -> Self {
        self.title_english = english.map(str::to_string);
        self.title_romaji = romaji.map(str::to_string);
        self.title_native = native.map(str::to_string);
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    /// Preferred title: English, then Romaji, then Native.
    /// Empty strings are skipped.
    pub fn display_title(&self) -> &str {
        [&self.title_english, &self.title_romaji, &self.title_native]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|title| !title.is_empty())
            .unwrap_or(UNKNOWN_TITLE)
    }

    /// Secondary title for two-line display.
    ///
    /// Romaji when both English and Romaji exist and differ, otherwise Native.
    pub fn alternative_title(&self) -> Option<&str> {
        match (&self.title_english, &self.title_romaji) {
            (Some(english), Some(romaji)) if english != romaji => Some(romaji.as_str()),
            _ => self.title_native.as_deref(),
        }
    }

    /// Case-insensitive substring match against the English title, the
    /// Romaji title and every genre label. An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        let contains = |field: &str| field.to_lowercase().contains(&needle);

        self.title_english.as_deref().is_some_and(contains)
            || self.title_romaji.as_deref().is_some_and(contains)
            || self.genres.iter().any(|genre| contains(genre.as_str()))
    }
}

impl AnimeStatus {
    /// Parse an AniList code; unrecognised codes map to `Unknown`
    pub fn from_code(code: &str) -> Self {
        match code {
            "FINISHED" => AnimeStatus::Finished,
            "RELEASING" => AnimeStatus::Releasing,
            "NOT_YET_RELEASED" => AnimeStatus::NotYetReleased,
            "CANCELLED" => AnimeStatus::Cancelled,
            "HIATUS" => AnimeStatus::Hiatus,
            _ => AnimeStatus::Unknown,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AnimeStatus::Finished => "FINISHED",
            AnimeStatus::Releasing => "RELEASING",
            AnimeStatus::NotYetReleased => "NOT_YET_RELEASED",
            AnimeStatus::Cancelled => "CANCELLED",
            AnimeStatus::Hiatus => "HIATUS",
            AnimeStatus::Unknown => "UNKNOWN",
        }
    }
}

impl AnimeFormat {
    /// Parse an AniList code; unrecognised codes map to `Unknown`
    pub fn from_code(code: &str) -> Self {
        match code {
            "TV" => AnimeFormat::Tv,
            "TV_SHORT" => AnimeFormat::TvShort,
            "MOVIE" => AnimeFormat::Movie,
            "SPECIAL" => AnimeFormat::Special,
            "OVA" => AnimeFormat::Ova,
            "ONA" => AnimeFormat::Ona,
            "MUSIC" => AnimeFormat::Music,
            _ => AnimeFormat::Unknown,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AnimeFormat::Tv => "TV",
            AnimeFormat::TvShort => "TV_SHORT",
            AnimeFormat::Movie => "MOVIE",
            AnimeFormat::Special => "SPECIAL",
            AnimeFormat::Ova => "OVA",
            AnimeFormat::Ona => "ONA",
            AnimeFormat::Music => "MUSIC",
            AnimeFormat::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for AnimeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::fmt::Display for AnimeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::fmt::Display for Anime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_title())
    }
}
