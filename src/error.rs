// Error types for hubsearch.
// Covers GitHub API failures, configuration errors, and general application errors.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubsearchError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("GitHub rejected the query: {message}")]
    InvalidQuery { message: String },

    #[error("GitHub responded with HTTP {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl HubsearchError {
    /// Status code to surface to the browser for this failure.
    pub fn http_status(&self) -> StatusCode {
        match self {
            HubsearchError::Unauthorized => StatusCode::UNAUTHORIZED,
            HubsearchError::NotFound(_) => StatusCode::NOT_FOUND,
            HubsearchError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            HubsearchError::InvalidQuery { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            HubsearchError::Config(_) | HubsearchError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            HubsearchError::Api(_) | HubsearchError::Upstream { .. } | HubsearchError::Json(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, HubsearchError>;
