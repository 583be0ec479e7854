//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure
    #[error("GraphQL request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("GraphQL request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Errors listed in the GraphQL response
    #[error("GraphQL errors: {}", .0.join(", "))]
    GraphQL(Vec<String>),

    /// Response carried neither data nor errors
    #[error("GraphQL response missing data")]
    MissingData,

    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<Error> for projectlink_core::Error {
    fn from(err: Error) -> Self {
        projectlink_core::Error::remote(err)
    }
}
