// Error types for listing and path resolution

#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    #[error("Transient service error: {message}")]
    Transient { message: String },

    #[error("Object not found: {id}")]
    NotFound { id: String },

    #[error("{operation} failed after {attempts} attempts: {source}")]
    RetryBudgetExhausted {
        operation: String,
        /// Attempts of the operation; a resumed listing counts once per resume
        attempts: u32,
        #[source]
        source: Box<DriveError>,
    },

    #[error("Sink write error: {0}")]
    SinkWrite(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Parent chain of {id} exceeds {depth} levels")]
    HierarchyTooDeep { id: String, depth: usize },
}

impl DriveError {
    pub fn transient(message: impl Into<String>) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether a retry budget may spend an attempt on this error.
    ///
    /// A missing parent is retried as well: the service occasionally
    /// reports freshly moved objects as absent for a short while.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. } | Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, DriveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(DriveError::transient("rate limited").is_retryable());
        assert!(DriveError::not_found("p1").is_retryable());
        assert!(!DriveError::config("bad").is_retryable());
        assert!(!DriveError::SinkWrite(std::io::Error::other("disk full")).is_retryable());

        let exhausted = DriveError::RetryBudgetExhausted {
            operation: "list files".to_string(),
            attempts: 4,
            source: Box::new(DriveError::transient("HTTP 500")),
        };
        assert!(!exhausted.is_retryable());
        assert_eq!(
            exhausted.to_string(),
            "list files failed after 4 attempts: Transient service error: HTTP 500"
        );
    }
}
