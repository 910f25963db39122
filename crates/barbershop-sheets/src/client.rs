//! HTTP client for the Google Sheets v4 values API.
//!
//! Only `spreadsheets.values.get` is used. Credentials are either a
//! pre-issued OAuth access token or an API key; see [`SheetsAuth`].

use std::time::Duration;

use barbershop_core::{SheetsAuth, SheetsConfig, SiteContent};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::cms::{CmsSheetValues, CMS_RANGES};
use crate::error::SheetsError;
use crate::retry::RetryPolicy;

const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_BACKOFF_BASE_MS: u64 = 500;

/// Body of a `values.get` response. `values` is omitted for an empty range.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Formatted cells arrive as strings; anything else is stringified.
fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub struct SheetsClient {
    client: Client,
    base_url: Url,
    spreadsheet_id: String,
    auth: SheetsAuth,
    retry: RetryPolicy,
}

impl SheetsClient {
    /// Creates a client for the spreadsheet described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SheetsError::InvalidUrl`] if
    /// `config.base_url` is not a valid URL.
    pub fn new(
        config: &SheetsConfig,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SheetsError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            spreadsheet_id: config.spreadsheet_id.clone(),
            auth: config.auth.clone(),
            retry: RetryPolicy::new(DEFAULT_MAX_RETRIES, DEFAULT_BACKOFF_BASE_MS),
        })
    }

    /// Overrides the retry policy for transient failures.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.retry = RetryPolicy::new(max_retries, backoff_base_ms);
        self
    }

    fn values_url(&self, range: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        }
        if let SheetsAuth::ApiKey(key) = &self.auth {
            url.query_pairs_mut().append_pair("key", key);
        }
        url
    }

    /// Reads one A1 range as rows of cell text.
    ///
    /// Transient failures are retried with back-off.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`SheetsError::Deserialize`] if the body is not a value range.
    pub async fn values(&self, range: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = self.values_url(range);
        let body = self.retry.run(range, || self.request_json(&url)).await?;

        let parsed: ValueRange =
            serde_json::from_value(body).map_err(|e| SheetsError::Deserialize {
                context: format!("values.get(range={range})"),
                source: e,
            })?;

        Ok(parsed
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    /// Reads every CMS range concurrently and assembles the site content.
    ///
    /// # Errors
    ///
    /// Fails if any single range read fails.
    pub async fn fetch_site_content(&self) -> Result<SiteContent, SheetsError> {
        let (hero, services_meta, services_items, gallery_meta, gallery_items) = tokio::try_join!(
            self.values(CMS_RANGES.hero),
            self.values(CMS_RANGES.services_meta),
            self.values(CMS_RANGES.services_items),
            self.values(CMS_RANGES.gallery_meta),
            self.values(CMS_RANGES.gallery_items),
        )?;

        tracing::debug!(
            services = services_items.len(),
            gallery = gallery_items.len(),
            "cms sheet values loaded"
        );

        Ok(CmsSheetValues {
            hero,
            services_meta,
            services_items,
            gallery_meta,
            gallery_items,
        }
        .into_site_content())
    }

    async fn request_json(&self, url: &Url) -> Result<Value, SheetsError> {
        let mut request = self.client.get(url.clone());
        if let SheetsAuth::Bearer(token) = &self.auth {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SheetsError::Deserialize {
            context: format!("{}{}", url.origin().ascii_serialization(), url.path()),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(auth: SheetsAuth) -> SheetsConfig {
        SheetsConfig {
            spreadsheet_id: "sheet-123".to_string(),
            auth,
            base_url: "https://sheets.googleapis.com/v4".to_string(),
        }
    }

    #[test]
    fn values_url_includes_spreadsheet_and_range() {
        let client = SheetsClient::new(&config(SheetsAuth::Bearer("t".into())), 5, "ua")
            .expect("client construction should not fail");
        let url = client.values_url("Hero!A1:K1");
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/Hero!A1:K1"
        );
    }

    #[test]
    fn api_key_is_sent_as_query_param() {
        let client = SheetsClient::new(&config(SheetsAuth::ApiKey("k-1".into())), 5, "ua")
            .expect("client construction should not fail");
        let url = client.values_url("Gallery!A2:C");
        assert_eq!(url.query(), Some("key=k-1"));
    }

    #[test]
    fn non_string_cells_are_stringified() {
        assert_eq!(cell_text(Value::String("x".into())), "x");
        assert_eq!(cell_text(serde_json::json!(42)), "42");
        assert_eq!(cell_text(Value::Null), "");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let mut cfg = config(SheetsAuth::Bearer("t".into()));
        cfg.base_url = "nope".to_string();
        assert!(matches!(
            SheetsClient::new(&cfg, 5, "ua"),
            Err(SheetsError::InvalidUrl { .. })
        ));
    }
}
