use reqwest::StatusCode;
use thiserror::Error;

/// A call to the wiki API failed before a usable response came back.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, TLS or timeout failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API responded with HTTP {0}")]
    Status(StatusCode),
    /// The API answered with an `{"error": {...}}` payload.
    #[error("API error [{code}]: {info}")]
    Api { code: String, info: String },
    #[error("malformed API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Everything a resolution step can fail with. Each step fails with exactly one kind.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("no wiki page found for {query:?}")]
    NotFound { query: String },
    #[error("section {section} of {title:?} contains no quotes")]
    EmptySection { title: String, section: String },
}

impl From<serde_json::Error> for QuoteError {
    fn from(e: serde_json::Error) -> Self {
        QuoteError::Transport(TransportError::Decode(e))
    }
}
