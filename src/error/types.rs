// src/error/types.rs
use serde::Serialize;
use thiserror::Error;

/// Coarse classification every failure collapses into.
///
/// Callers branch on this rather than on the concrete variant, so a new
/// backend can introduce its own source errors without breaking them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The requested scope no longer exists in the data source
    NotFound,
    /// The backing store (network, database) cannot be reached
    Unavailable,
    /// Malformed identifier or query
    InvalidInput,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::InvalidInput(_) => ErrorKind::InvalidInput,
            AppError::Http(e) if e.status() == Some(reqwest::StatusCode::NOT_FOUND) => {
                ErrorKind::NotFound
            }
            AppError::Unavailable(_)
            | AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Serialization(_)
            | AppError::Io(_)
            | AppError::Http(_) => ErrorKind::Unavailable,
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Unavailable(format!("Background task failed: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_failures_are_unavailable() {
        let err = AppError::Pool("timed out".to_string());
        assert_eq!(err.kind(), ErrorKind::Unavailable);

        let err = AppError::Database(rusqlite::Error::InvalidQuery);
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[test]
    fn test_taxonomy_variants_keep_their_kind() {
        assert_eq!(AppError::NotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            AppError::InvalidInput("x".into()).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            AppError::Unavailable("x".into()).kind(),
            ErrorKind::Unavailable
        );
    }

    #[test]
    fn test_serializes_as_message() {
        let err = AppError::NotFound("watch list".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Not found: watch list\"");
    }
}
