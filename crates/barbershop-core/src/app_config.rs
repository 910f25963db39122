use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Credentials used against the Google Sheets values API.
#[derive(Clone, PartialEq, Eq)]
pub enum SheetsAuth {
    /// Pre-issued OAuth access token, sent as `Authorization: Bearer`.
    Bearer(String),
    /// API key appended as the `key` query parameter (public sheets only).
    ApiKey(String),
}

impl std::fmt::Debug for SheetsAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SheetsAuth::Bearer(_) => f.write_str("Bearer([redacted])"),
            SheetsAuth::ApiKey(_) => f.write_str("ApiKey([redacted])"),
        }
    }
}

/// Where the `/api/cms` endpoint reads its spreadsheet from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub auth: SheetsAuth,
    pub base_url: String,
}

/// Spreadsheet webhook receiving booking and franchise submissions.
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    pub endpoint: String,
    pub secret: String,
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("endpoint", &self.endpoint)
            .field("secret", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub branches_path: PathBuf,
    pub content_dir: PathBuf,
    pub content_base_url: String,
    pub sheets: Option<SheetsConfig>,
    pub webhook: Option<WebhookConfig>,
    pub http_request_timeout_secs: u64,
    pub http_user_agent: String,
    pub http_max_retries: u32,
    pub http_retry_backoff_base_ms: u64,
    pub slot_lookup_delay_ms: u64,
    pub booking_submit_delay_ms: u64,
    pub franchise_submit_delay_ms: u64,
    pub utc_offset_minutes: i32,
    pub submit_rate_limit_per_minute: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("branches_path", &self.branches_path)
            .field("content_dir", &self.content_dir)
            .field("content_base_url", &self.content_base_url)
            .field("sheets", &self.sheets)
            .field("webhook", &self.webhook)
            .field("http_request_timeout_secs", &self.http_request_timeout_secs)
            .field("http_user_agent", &self.http_user_agent)
            .field("http_max_retries", &self.http_max_retries)
            .field(
                "http_retry_backoff_base_ms",
                &self.http_retry_backoff_base_ms,
            )
            .field("slot_lookup_delay_ms", &self.slot_lookup_delay_ms)
            .field("booking_submit_delay_ms", &self.booking_submit_delay_ms)
            .field("franchise_submit_delay_ms", &self.franchise_submit_delay_ms)
            .field("utc_offset_minutes", &self.utc_offset_minutes)
            .field(
                "submit_rate_limit_per_minute",
                &self.submit_rate_limit_per_minute,
            )
            .finish()
    }
}
