use thiserror::Error;

/// Result type alias for blocker operations
pub type Result<T> = std::result::Result<T, BlockerError>;

/// Errors that can occur while looking up or syncing blocklists
#[derive(Error, Debug)]
pub enum BlockerError {
    /// Caller passed an empty value or selected no lookup channel
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Forward DNS resolution of a lookup value failed
    #[error("DNS resolution failed: {0}")]
    Resolution(String),

    /// A text-list source could not be downloaded
    #[error("download failed for '{url}': {message}")]
    Download {
        /// Source URL that failed
        url: String,
        /// Transport or status description
        message: String,
    },

    /// A downloaded body could not be decoded as text
    #[error("decode failed for '{url}': {message}")]
    Decode {
        /// Source URL whose body failed to decode
        url: String,
        /// Decoder description
        message: String,
    },

    /// The synchronized snapshot could not be written to durable storage
    #[error("persistence failed: {0}")]
    Persistence(String),

    /// A text-list lookup was requested but no snapshot data is obtainable
    #[error("no text-list data available")]
    DataUnavailable,

    /// Operation exceeded its overall deadline
    #[error("operation timed out after {0} seconds")]
    Timeout(u64),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BlockerError {
    /// Returns true if the error indicates bad caller input rather than a
    /// runtime failure
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns true if the error is contained per-item during concurrent
    /// batches and never aborts sibling work
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Resolution(_) | Self::Download { .. } | Self::Decode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_errors() {
        assert!(BlockerError::InvalidArgument("no value".into()).is_usage_error());
        assert!(!BlockerError::DataUnavailable.is_usage_error());
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(BlockerError::Resolution("NXDOMAIN".into()).is_recoverable());
        assert!(BlockerError::Download {
            url: "http://example.com/list".into(),
            message: "503".into(),
        }
        .is_recoverable());
        assert!(!BlockerError::Persistence("disk full".into()).is_recoverable());
    }
}
