mod api;
mod middleware;

use std::sync::Arc;

use anyhow::Context;
use barbershop_core::{default_branches, load_branches, ShopClock};
use barbershop_sheets::{SheetsClient, WebhookClient};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState, SubmitDelays},
    middleware::RateLimitState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Arc::new(barbershop_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let branches = if config.branches_path.exists() {
        load_branches(&config.branches_path)?
    } else {
        tracing::warn!(
            path = %config.branches_path.display(),
            "branches file not found; using built-in branches"
        );
        default_branches()
    };

    let sheets = config
        .sheets
        .as_ref()
        .map(|sheets| {
            SheetsClient::new(
                sheets,
                config.http_request_timeout_secs,
                &config.http_user_agent,
            )
            .map(|client| {
                Arc::new(client.with_retry(
                    config.http_max_retries,
                    config.http_retry_backoff_base_ms,
                ))
            })
        })
        .transpose()
        .context("failed to build sheets client")?;

    let webhook = config
        .webhook
        .as_ref()
        .map(|webhook| {
            WebhookClient::new(
                webhook,
                config.http_request_timeout_secs,
                &config.http_user_agent,
            )
        })
        .transpose()
        .context("failed to build webhook client")?;

    tracing::info!(
        env = %config.env,
        branches = branches.branches.len(),
        sheets = sheets.is_some(),
        webhook = webhook.is_some(),
        content_dir = %config.content_dir.display(),
        "starting barbershop server"
    );

    let state = AppState {
        branches: Arc::new(branches),
        clock: Arc::new(ShopClock::from_offset_minutes(config.utc_offset_minutes)),
        content_dir: Arc::new(config.content_dir.clone()),
        sheets,
        webhook,
        delays: SubmitDelays::from_config(&config),
    };
    let app = build_app(
        state,
        RateLimitState::per_minute(config.submit_rate_limit_per_minute),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
