//! Error types for target pair operations.

/// Errors that can occur while parsing or validating a target pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    /// The token does not contain exactly one `/` separator.
    #[error("malformed target pair '{token}': expected GOOS/GOARCH")]
    Malformed {
        /// The offending command-line token.
        token: String,
    },

    /// The operating system and architecture are not a supported combination.
    #[error("unsupported target pair: {os}/{arch}")]
    Unsupported {
        /// Requested operating system.
        os: String,
        /// Requested architecture.
        arch: String,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
