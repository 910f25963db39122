use thiserror::Error;

/// Reasons a content document could not be loaded.
///
/// These never reach page rendering: [`crate::ContentClient::fetch`] logs them
/// and returns `None` so callers fall back to built-in defaults.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("content at {url} is not a JSON object")]
    NotAnObject { url: String },

    #[error("invalid content base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
