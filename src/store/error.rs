//! Error types for the result store.

use thiserror::Error;

/// Errors that can occur when opening or reading the result store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not be opened, fetched or queried.
    #[error("Status store unavailable: {0}")]
    Unavailable(String),

    /// A per-target lookup referenced an id that is not in the `url` table.
    #[error("URL with ID {0} not found")]
    TargetNotFound(i64),
}

impl StoreError {
    /// Build an `Unavailable` error from anything displayable.
    pub fn unavailable(message: impl std::fmt::Display) -> Self {
        StoreError::Unavailable(message.to_string())
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Unavailable(format!("query failed: {}", err))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StoreError::Unavailable("snapshot request timed out".to_string())
        } else if err.is_connect() {
            StoreError::Unavailable(format!("connection failed: {}", err))
        } else {
            StoreError::Unavailable(format!("snapshot request failed: {}", err))
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Unavailable(format!("I/O error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = StoreError::unavailable("Failed to fetch database: 404 Not Found");
        assert_eq!(
            err.to_string(),
            "Status store unavailable: Failed to fetch database: 404 Not Found"
        );
        assert_eq!(StoreError::TargetNotFound(7).to_string(), "URL with ID 7 not found");
    }

    #[test]
    fn test_from_rusqlite_is_unavailable() {
        let err: StoreError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
