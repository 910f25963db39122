//! HTTP client for the static content host.
//!
//! Each document lives at `{base_url}/{key}.json`. Successful loads are cached
//! for the lifetime of the client; failures are logged and reported as `None`
//! so the page keeps rendering with its built-in copy.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use barbershop_core::{ContentKey, GalleryContent, HeroContent, ServicesContent, SiteContent};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::error::ContentError;

/// A content document as returned by the host.
pub type ContentObject = Map<String, Value>;

/// Cached reader for the content documents.
///
/// Cloning is cheap and clones share the cache. Concurrent misses for the same
/// key are not coalesced; whichever response lands last wins the cache slot.
#[derive(Clone)]
pub struct ContentClient {
    client: Client,
    base_url: Url,
    cache: Arc<RwLock<HashMap<ContentKey, ContentObject>>>,
}

impl ContentClient {
    /// Creates a client reading documents below `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ContentError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ContentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Always end with a slash so document URLs append to the full path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ContentError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            cache: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    #[must_use]
    pub fn document_url(&self, key: ContentKey) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&key.file_name());
        }
        url
    }

    /// Returns the raw JSON object for `key`, or `None` on any failure.
    ///
    /// Cache hits never touch the network. Network errors, non-2xx statuses,
    /// unparsable bodies and non-object payloads are logged at `warn` and are
    /// not cached, so a later call tries again.
    pub async fn fetch(&self, key: ContentKey) -> Option<ContentObject> {
        if let Some(hit) = self.cache.read().await.get(&key) {
            return Some(hit.clone());
        }

        match self.try_fetch(key).await {
            Ok(object) => {
                self.cache.write().await.insert(key, object.clone());
                Some(object)
            }
            Err(error) => {
                tracing::warn!(key = %key, error = %error, "content fetch failed");
                None
            }
        }
    }

    /// Like [`ContentClient::fetch`] but deserialized into `T`.
    ///
    /// A document whose fields have the wrong shape counts as a failure.
    pub async fn fetch_as<T: DeserializeOwned>(&self, key: ContentKey) -> Option<T> {
        let object = self.fetch(key).await?;
        match serde_json::from_value(Value::Object(object)) {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                tracing::warn!(key = %key, error = %error, "content document has an unexpected shape");
                None
            }
        }
    }

    /// Hero content, falling back to the built-in copy.
    pub async fn hero(&self) -> HeroContent {
        self.fetch_as(ContentKey::Hero)
            .await
            .unwrap_or_else(HeroContent::defaults)
    }

    /// Services content, falling back to the built-in copy.
    pub async fn services(&self) -> ServicesContent {
        self.fetch_as(ContentKey::Services)
            .await
            .unwrap_or_else(ServicesContent::defaults)
    }

    /// Gallery content, falling back to the built-in copy.
    pub async fn gallery(&self) -> GalleryContent {
        self.fetch_as(ContentKey::Gallery)
            .await
            .unwrap_or_else(GalleryContent::defaults)
    }

    /// All three documents, each loaded and defaulted independently.
    pub async fn site(&self) -> SiteContent {
        let (hero, services, gallery) = tokio::join!(self.hero(), self.services(), self.gallery());
        SiteContent {
            hero,
            services,
            gallery,
        }
    }

    pub async fn is_cached(&self, key: ContentKey) -> bool {
        self.cache.read().await.contains_key(&key)
    }

    async fn try_fetch(&self, key: ContentKey) -> Result<ContentObject, ContentError> {
        let url = self.document_url(key);
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body).map_err(|e| ContentError::Deserialize {
            context: url.to_string(),
            source: e,
        })?;

        match value {
            Value::Object(object) => Ok(object),
            _ => Err(ContentError::NotAnObject {
                url: url.to_string(),
            }),
        }
    }
}
