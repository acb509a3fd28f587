use std::io;
use thiserror::Error;

/// Custom result type for the SDK
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the MillionVerifier SDK
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Request rejected client-side, before anything was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid file
    #[error("Invalid file: {0}")]
    InvalidFile(String),

    /// Response does not have the declared shape
    #[error("Invalid data format: {0}")]
    InvalidData(String),

    /// Non-success HTTP status from the API, with the raw response body
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// Polling gave up before the file reached a terminal status
    #[error("Timed out: {0}")]
    Timeout(String),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// IO error
    #[error("IO error: {0}")]
    IOError(#[from] io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Coarse classification of an API error body.
///
/// The API reports every failure through the same error kind; this is a
/// best-effort reading of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    InvalidApiKey,
    IpAddressBlocked,
    FileNotFound,
    InvalidParameter,
    Other,
}

impl ApiErrorKind {
    /// Classify a raw response body
    pub fn from_body(body: &str) -> Self {
        let body = body.to_ascii_lowercase();

        if body.contains("api key") || body.contains("apikey") || body.contains("api_key") {
            ApiErrorKind::InvalidApiKey
        } else if has_word(&body, "ip") && body.contains("block") {
            ApiErrorKind::IpAddressBlocked
        } else if body.contains("not found") || body.contains("no such file") {
            ApiErrorKind::FileNotFound
        } else if body.contains("invalid") || body.contains("parameter") {
            ApiErrorKind::InvalidParameter
        } else {
            ApiErrorKind::Other
        }
    }
}

fn has_word(text: &str, word: &str) -> bool {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .any(|w| w == word)
}

impl Error {
    /// Classification of an [`Error::Api`] body, `None` for any other error
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Error::Api { body, .. } => Some(ApiErrorKind::from_body(body)),
            _ => None,
        }
    }
}
