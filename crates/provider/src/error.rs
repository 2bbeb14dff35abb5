use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while preparing or delivering a notification.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The notification could not be turned into a deliverable message.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The server did not respond within the allowed duration.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    /// A network or transport-level error occurred.
    #[error("connection error: {0}")]
    Connection(String),

    /// The plugin was given invalid configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The message body could not be rendered.
    #[error("template error: {0}")]
    Template(String),
}

impl ProviderError {
    /// Returns `true` if the error is transient and the operation may succeed
    /// on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Connection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(ProviderError::Timeout(Duration::from_secs(5)).is_retryable());
        assert!(ProviderError::Connection("reset".into()).is_retryable());
    }

    #[test]
    fn non_retryable_errors() {
        assert!(!ProviderError::ExecutionFailed("x".into()).is_retryable());
        assert!(!ProviderError::Configuration("x".into()).is_retryable());
        assert!(!ProviderError::Template("x".into()).is_retryable());
    }

    #[test]
    fn error_display() {
        let err = ProviderError::Configuration("smtp_server must not be empty".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: smtp_server must not be empty"
        );

        let err = ProviderError::Timeout(Duration::from_millis(500));
        assert_eq!(err.to_string(), "timeout after 500ms");
    }
}
