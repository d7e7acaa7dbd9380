//! Retrieval error types

use thiserror::Error;

/// Broad failure class, used for logging and by bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Non-2xx HTTP status
    Retrieval,
    /// Well-formed response with zero tools
    EmptyResult,
    /// Transport-level failure (connection refused, timeout, TLS)
    Network,
    /// Body was not the expected JSON
    InvalidResponse,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Retrieval => "retrieval",
            FailureKind::EmptyResult => "empty_result",
            FailureKind::Network => "network",
            FailureKind::InvalidResponse => "invalid_response",
        }
    }
}

/// Errors from a router call
#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("API error: {status}")]
    Status { status: u16 },

    #[error("{reason}")]
    EmptyResult { reason: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// Raised by test doubles and non-HTTP transports
    #[error("{0}")]
    Transport(String),
}

impl RetrievalError {
    pub fn status(status: u16) -> Self {
        Self::Status { status }
    }

    pub fn empty(reason: impl Into<String>) -> Self {
        Self::EmptyResult {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            RetrievalError::Status { .. } => FailureKind::Retrieval,
            RetrievalError::EmptyResult { .. } => FailureKind::EmptyResult,
            RetrievalError::Network(_) | RetrievalError::Transport(_) => FailureKind::Network,
            RetrievalError::InvalidResponse(_) => FailureKind::InvalidResponse,
        }
    }
}

pub type RetrievalResult<T> = Result<T, RetrievalError>;

/// Startup catalog fetch failed; never fatal
#[derive(Error, Debug)]
#[error("Catalog load failed: {0}")]
pub struct CatalogLoadError(#[from] pub RetrievalError);
