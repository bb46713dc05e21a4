//! Error types for the news proxy

use thiserror::Error;

/// Any failure fetching, reading or parsing the upstream feed
#[derive(Error, Debug)]
pub enum FeedError {
    /// HTTP request failed (connect, send or body read)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Upstream answered with a non-success status
    #[error("Upstream error (status {status}): {message}")]
    UpstreamStatus {
        /// HTTP status code
        status: u16,
        /// Description of the failed request
        message: String,
    },

    /// Body is not well-formed XML
    #[error("Parse error: {0}")]
    Parse(String),
}

impl FeedError {
    pub fn request(msg: impl Into<String>) -> Self {
        FeedError::RequestFailed(msg.into())
    }

    pub fn upstream_status(status: u16, message: impl Into<String>) -> Self {
        FeedError::UpstreamStatus {
            status,
            message: message.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        FeedError::Parse(msg.into())
    }
}

/// Result type alias for feed operations
pub type FeedResult<T> = Result<T, FeedError>;
