//! Error types for repostatslib

use thiserror::Error;

/// Errors that can occur while fetching or aggregating repository statistics
#[derive(Error, Debug)]
pub enum RepoStatsError {
    /// Username or repository name not provided
    #[error("Please enter both username and repository name")]
    MissingInput,

    /// Repository identifier could not be parsed
    #[error("invalid repository '{0}': expected OWNER/REPO")]
    InvalidRepo(String),

    /// The host answered with a non-success status
    #[error("{message}")]
    FetchFailed { message: String },

    /// Nothing left to compute percentages from
    #[error("no data to display: every file was filtered out or the repository is empty")]
    EmptyAggregation,

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body could not be decoded
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Git operation error
    #[error("git error: {0}")]
    GitError(String),

    /// The source cannot provide the requested data
    #[error("unsupported by this source: {0}")]
    Unsupported(&'static str),
}

impl From<reqwest::Error> for RepoStatsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepoStatsError::Decode(err.to_string())
        } else {
            RepoStatsError::Http(err.to_string())
        }
    }
}
