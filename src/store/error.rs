//! Storage error types.

use std::fmt;

use derive_more::Error;
use tracing::instrument;

/// Storage error with location tracking and, when one was involved, the key
/// being read or written.
#[derive(Debug, Clone, Error)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Key the failed operation touched.
    pub key: Option<String>,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new storage error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            key: None,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Attaches the key the failed operation touched.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(
                f,
                "Store error on key '{}': {} at {}:{}",
                key, self.message, self.file, self.line
            ),
            None => write!(f, "Store error: {} at {}:{}", self.message, self.file, self.line),
        }
    }
}

impl From<diesel::result::Error> for StoreError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Diesel error: {}", err))
    }
}

impl From<diesel::ConnectionError> for StoreError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Connection error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_key() {
        let err = StoreError::new("disk full").with_key("StoredGame-value-7");
        let text = err.to_string();
        assert!(text.starts_with("Store error on key 'StoredGame-value-7': disk full at "));
        assert!(text.contains("error.rs"));
    }

    #[test]
    fn test_display_without_key() {
        let err = StoreError::from(diesel::result::Error::NotFound);
        assert_eq!(err.key, None);
        assert!(err.to_string().starts_with("Store error: Diesel error: "));
    }
}
