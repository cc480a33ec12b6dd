use serde::{Deserialize, Serialize};

/// The three user-curated membership lists.
///
/// Lists are independent: the same record may be a member of several at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchList {
    Watching,
    Watched,
    ToWatch,
}

impl WatchList {
    pub const ALL: [WatchList; 3] = [WatchList::Watching, WatchList::Watched, WatchList::ToWatch];

    /// Stable code used as the storage key
    pub fn code(&self) -> &'static str {
        match self {
            WatchList::Watching => "watching",
            WatchList::Watched => "watched",
            WatchList::ToWatch => "to_watch",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|list| list.code() == code)
    }

    /// Heading shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            WatchList::Watching => "Watching",
            WatchList::Watched => "Watched",
            WatchList::ToWatch => "To Watch",
        }
    }
}

impl std::fmt::Display for WatchList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
