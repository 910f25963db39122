//! `content` command: fetches one document from the content host.

use barbershop_content::ContentClient;
use barbershop_core::{AppConfig, ContentKey};

/// Prints the document for `key` as pretty JSON.
///
/// Without `--raw` the typed record is printed, so a failed fetch shows the
/// built-in defaults. With `--raw` a failed fetch is an error.
///
/// # Errors
///
/// Returns an error if the client cannot be built, if `raw` is set and the
/// document could not be fetched, or if serialization fails.
pub(crate) async fn run_content(
    config: &AppConfig,
    key: ContentKey,
    raw: bool,
) -> anyhow::Result<()> {
    let client = ContentClient::new(
        &config.content_base_url,
        config.http_request_timeout_secs,
        &config.http_user_agent,
    )?;

    let fetched = client.fetch(key).await;
    let source = if fetched.is_some() { "remote" } else { "defaults" };
    tracing::info!(key = %key, url = %client.document_url(key), source, "content resolved");

    let json = if raw {
        let Some(object) = fetched else {
            anyhow::bail!("could not fetch {} from {}", key, client.document_url(key));
        };
        serde_json::Value::Object(object)
    } else {
        match key {
            ContentKey::Hero => serde_json::to_value(client.hero().await)?,
            ContentKey::Services => serde_json::to_value(client.services().await)?,
            ContentKey::Gallery => serde_json::to_value(client.gallery().await)?,
        }
    };

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
