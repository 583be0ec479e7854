//! Error types for Projectlink

use thiserror::Error;

/// Result type alias for Projectlink operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Projectlink operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The triggering event carries no pull request
    #[error("This is not a PR")]
    NotAPullRequest,

    /// Failure reported by the remote project board, lookup or mutation alike
    #[error(transparent)]
    Remote(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    /// Wrap any remote-side failure
    pub fn remote(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Remote(Box::new(err))
    }
}
