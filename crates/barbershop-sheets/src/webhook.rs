//! Spreadsheet webhook for form submissions.
//!
//! The receiving script reads a JSON object carrying the shared `secret`, a
//! `type` discriminator and the form fields. The body is sent as
//! `text/plain;charset=utf-8`, which the script endpoint accepts without a CORS
//! preflight. Callers treat delivery as fire-and-forget: see
//! [`WebhookClient::submit_detached`].

use std::time::Duration;

use barbershop_core::{BookingDraft, FranchiseInquiry, WebhookConfig};
use reqwest::{header, Client, Url};
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::error::SheetsError;

const CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// A form submission, tagged with its `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Submission {
    Booking(BookingDraft),
    Franchise(FranchiseInquiry),
}

impl Submission {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Submission::Booking(_) => "booking",
            Submission::Franchise(_) => "franchise",
        }
    }
}

#[derive(Serialize)]
struct WebhookBody<'a> {
    secret: &'a str,
    #[serde(flatten)]
    submission: &'a Submission,
}

/// Encodes the request body for `submission`.
///
/// # Errors
///
/// Returns [`SheetsError::Encode`] if serialization fails.
pub fn encode_body(secret: &str, submission: &Submission) -> Result<String, SheetsError> {
    serde_json::to_string(&WebhookBody { secret, submission }).map_err(SheetsError::Encode)
}

#[derive(Clone)]
pub struct WebhookClient {
    client: Client,
    endpoint: Url,
    secret: String,
}

impl std::fmt::Debug for WebhookClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("secret", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl WebhookClient {
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SheetsError::InvalidUrl`] if the endpoint
    /// does not parse.
    pub fn new(
        config: &WebhookConfig,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let endpoint = Url::parse(&config.endpoint).map_err(|e| SheetsError::InvalidUrl {
            url: config.endpoint.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client,
            endpoint,
            secret: config.secret.clone(),
        })
    }

    /// Posts one submission and waits for the response status.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Encode`] if the body cannot be encoded.
    /// - [`SheetsError::Http`] on network failure or non-2xx HTTP status.
    pub async fn post(&self, submission: &Submission) -> Result<(), SheetsError> {
        let body = encode_body(&self.secret, submission)?;
        self.client
            .post(self.endpoint.clone())
            .header(header::CONTENT_TYPE, CONTENT_TYPE)
            .body(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Posts `submission` on a background task.
    ///
    /// Failures are logged at `warn` and otherwise ignored. The returned handle
    /// is only useful to tests; production callers drop it.
    pub fn submit_detached(&self, submission: Submission) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            let kind = submission.kind();
            match this.post(&submission).await {
                Ok(()) => tracing::info!(kind, "submission forwarded to spreadsheet"),
                Err(error) => {
                    tracing::warn!(kind, error = %error, "spreadsheet webhook delivery failed");
                }
            }
        })
    }
}
