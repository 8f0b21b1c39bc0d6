use thiserror::Error;

/// Why a fetch did not produce data. `Display` is the message shown to the
/// user in place of the content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Blank search term; no request was issued.
    #[error("Please enter a search term.")]
    EmptyQuery,
    /// Non-2xx answer from the backend.
    #[error("{message}")]
    Http { status: u16, message: String },
    /// The request did not complete or the body could not be read.
    #[error("{0}")]
    Network(String),
    /// 404 from the roster endpoint, which means the client is misconfigured.
    #[error("API not found (404). Check the configured base URL and the backend routes.")]
    NotFound,
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            FetchError::NotFound => Some(404),
            FetchError::EmptyQuery | FetchError::Network(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("page limit must be at least 1")]
    ZeroLimit,
}
