use thiserror::Error;

/// Errors returned by the Sheets reader and the submission webhook.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Network or TLS failure, or a non-2xx status surfaced by `error_for_status`.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The submission payload could not be encoded.
    #[error("failed to encode webhook payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
