// src/application/error_handling.rs
//
// Error mapping for the UI boundary
//
// ARCHITECTURE:
// - Maps internal errors → user-facing responses
// - Never exposes storage or transport internals in the message
// - Logs full errors for debugging

use crate::error::{AppError, ErrorKind};
use serde::{Deserialize, Serialize};

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The requested list or record no longer exists
    NotFound,

    /// Malformed identifier or query
    Validation,

    /// Network or database cannot be reached
    Unavailable,
}

impl From<ErrorKind> for ErrorType {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => ErrorType::NotFound,
            ErrorKind::InvalidInput => ErrorType::Validation,
            ErrorKind::Unavailable => ErrorType::Unavailable,
        }
    }
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        let error_type = ErrorType::from(error.kind());

        match error {
            AppError::NotFound(what) => Self {
                success: false,
                error_type,
                message: "Not found".to_string(),
                details: Some(what),
            },

            AppError::InvalidInput(reason) => Self {
                success: false,
                error_type,
                message: "Invalid request".to_string(),
                details: Some(reason),
            },

            AppError::Unavailable(reason) => {
                log::warn!("Backend unavailable: {}", reason);
                Self {
                    success: false,
                    error_type,
                    message: "Service unavailable, try again later".to_string(),
                    details: None,
                }
            }

            other => {
                // Storage / transport internals stay in the log
                log::error!("Internal failure: {:?}", other);
                Self {
                    success: false,
                    error_type,
                    message: match error_type {
                        ErrorType::NotFound => "Not found".to_string(),
                        _ => "Service unavailable, try again later".to_string(),
                    },
                    details: Some("Check logs for details".to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound("watch list".to_string()));
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.details.as_deref(), Some("watch list"));
    }

    #[test]
    fn test_validation_error() {
        let error = ErrorResponse::from_app_error(AppError::InvalidInput("bad id".to_string()));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert!(!error.success);
    }

    #[test]
    fn test_database_error_hides_details() {
        let error =
            ErrorResponse::from_app_error(AppError::Database(rusqlite::Error::InvalidQuery));
        assert_eq!(error.error_type, ErrorType::Unavailable);
        assert_eq!(error.details.as_deref(), Some("Check logs for details"));
    }
}
