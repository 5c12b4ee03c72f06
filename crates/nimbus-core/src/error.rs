//! Error types for the Nimbus core.

/// Core error type for Nimbus infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum NimbusError {
    /// Invalid account ID format.
    #[error("invalid account ID: {0} (must be 12-digit numeric string)")]
    InvalidAccountId(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for Nimbus operations.
pub type NimbusResult<T> = Result<T, NimbusError>;
