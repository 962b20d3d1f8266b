//! Error types for backend calls.

use thiserror::Error;

/// Coarse classification shown to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The backend could not be reached at all.
    Transport,
    /// The backend answered, but not with a usable result.
    Application,
}

/// Failure of a single backend call.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection refused, timeout, DNS failure and similar.
    #[error("could not reach backend: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status.
    #[error("backend returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body as text, possibly empty.
        body: String,
    },

    /// Backend answered `success: false`.
    #[error("{}", message.as_deref().unwrap_or("unknown error"))]
    Rejected {
        /// The `error` field of the envelope, if any.
        message: Option<String>,
    },

    /// Body did not match the expected schema.
    #[error("unexpected response: {0}")]
    MalformedResponse(String),

    /// The request could not be built locally; nothing was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An endpoint URL could not be built from the configured base.
    #[error("invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl BackendError {
    /// Classify the error for display.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::Status { .. }
            | Self::Rejected { .. }
            | Self::MalformedResponse(_)
            | Self::InvalidRequest(_)
            | Self::InvalidUrl(_) => ErrorKind::Application,
        }
    }
}

/// Result type alias for backend calls.
pub type Result<T> = std::result::Result<T, BackendError>;
