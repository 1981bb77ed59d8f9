//! Error types for the log model.

use thiserror::Error;

/// Errors that can occur while building or serializing log data.
#[derive(Debug, Error)]
pub enum LogError {
    /// A required field was not provided to the entry builder.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for log operations.
pub type Result<T> = std::result::Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = LogError::MissingField("timestamp");
        assert_eq!(err.to_string(), "missing required field: timestamp");
    }

    #[test]
    fn error_wraps_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json")
            .err()
            .map(LogError::from);
        assert!(parse_err.is_some());
        if let Some(err) = parse_err {
            assert!(err.to_string().starts_with("serialization error"));
        }
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LogError>();
    }
}
