use thiserror::Error;

use crate::extractor::ExtractError;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("search query is empty")]
    InvalidQuery,
    #[error("invalid translation path {0:?}")]
    InvalidPath(String),
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("page not found: {0}")]
    NotFound(String),
    #[error("upstream returned {status} for {url}")]
    Status { status: u16, url: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl ScrapeError {
    /// Errors caused by what the caller asked for, as opposed to upstream trouble.
    pub fn is_bad_input(&self) -> bool {
        matches!(self, ScrapeError::InvalidQuery | ScrapeError::InvalidPath(_))
    }
}
