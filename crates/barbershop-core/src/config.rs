use crate::app_config::{AppConfig, Environment, SheetsAuth, SheetsConfig, WebhookConfig};
use crate::ConfigError;

const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Kept separate from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("BARBERSHOP_ENV", "development"))?;

    let bind_addr = parse_addr("BARBERSHOP_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("BARBERSHOP_LOG_LEVEL", "info");
    let branches_path = PathBuf::from(or_default(
        "BARBERSHOP_BRANCHES_PATH",
        "./config/branches.yaml",
    ));
    let content_dir = PathBuf::from(or_default("BARBERSHOP_CONTENT_DIR", "./public/content"));
    let content_base_url = or_default(
        "BARBERSHOP_CONTENT_BASE_URL",
        "http://localhost:3000/content",
    );

    let sheets = match optional("SPREADSHEET_ID") {
        Some(spreadsheet_id) => {
            let auth = if let Some(token) = optional("GOOGLE_ACCESS_TOKEN") {
                SheetsAuth::Bearer(token)
            } else if let Some(key) = optional("GOOGLE_API_KEY") {
                SheetsAuth::ApiKey(key)
            } else {
                return Err(ConfigError::MissingEnvVar("GOOGLE_ACCESS_TOKEN".to_string()));
            };
            Some(SheetsConfig {
                spreadsheet_id,
                auth,
                base_url: or_default("BARBERSHOP_SHEETS_BASE_URL", DEFAULT_SHEETS_BASE_URL),
            })
        }
        None => None,
    };

    let webhook = match optional("BARBERSHOP_GSHEET_ENDPOINT") {
        Some(endpoint) => {
            let secret = optional("BARBERSHOP_GSHEET_SECRET").ok_or_else(|| {
                ConfigError::MissingEnvVar("BARBERSHOP_GSHEET_SECRET".to_string())
            })?;
            Some(WebhookConfig { endpoint, secret })
        }
        None => None,
    };

    let http_request_timeout_secs = parse_u64("BARBERSHOP_HTTP_REQUEST_TIMEOUT_SECS", "30")?;
    let http_user_agent = or_default("BARBERSHOP_HTTP_USER_AGENT", "barbershop/0.1 (site-content)");
    let http_max_retries = parse_u32("BARBERSHOP_HTTP_MAX_RETRIES", "2")?;
    let http_retry_backoff_base_ms = parse_u64("BARBERSHOP_HTTP_RETRY_BACKOFF_BASE_MS", "500")?;

    let slot_lookup_delay_ms = parse_u64("BARBERSHOP_SLOT_LOOKUP_DELAY_MS", "500")?;
    let booking_submit_delay_ms = parse_u64("BARBERSHOP_BOOKING_SUBMIT_DELAY_MS", "1500")?;
    let franchise_submit_delay_ms = parse_u64("BARBERSHOP_FRANCHISE_SUBMIT_DELAY_MS", "800")?;

    let utc_offset_minutes = or_default("BARBERSHOP_UTC_OFFSET_MINUTES", "330")
        .parse::<i32>()
        .map_err(|e| invalid("BARBERSHOP_UTC_OFFSET_MINUTES", e.to_string()))?;
    if !(-720..=840).contains(&utc_offset_minutes) {
        return Err(invalid(
            "BARBERSHOP_UTC_OFFSET_MINUTES",
            format!("{utc_offset_minutes} is outside -720..=840"),
        ));
    }

    let submit_rate_limit_per_minute = parse_usize("BARBERSHOP_SUBMIT_RATE_LIMIT_PER_MINUTE", "30")?;
    if submit_rate_limit_per_minute == 0 {
        return Err(invalid(
            "BARBERSHOP_SUBMIT_RATE_LIMIT_PER_MINUTE",
            "must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        branches_path,
        content_dir,
        content_base_url,
        sheets,
        webhook,
        http_request_timeout_secs,
        http_user_agent,
        http_max_retries,
        http_retry_backoff_base_ms,
        slot_lookup_delay_ms,
        booking_submit_delay_ms,
        franchise_submit_delay_ms,
        utc_offset_minutes,
        submit_rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BARBERSHOP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
