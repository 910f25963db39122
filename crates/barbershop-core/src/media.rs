//! Media path validation and the image/video/placeholder render decision.

use crate::content::{MediaItem, MediaKind};

/// Prefixes a media `src` must start with to be rendered.
pub const VALID_MEDIA_PREFIXES: [&str; 4] = ["/uploads/", "/Images/", "https://", "http://"];

/// Returns `true` when `src` is non-blank and starts with an allowed prefix.
#[must_use]
pub fn is_valid_media_path(src: &str) -> bool {
    if src.trim().is_empty() {
        return false;
    }
    VALID_MEDIA_PREFIXES
        .iter()
        .any(|prefix| src.starts_with(prefix))
}

/// `src` when valid, otherwise `fallback`.
#[must_use]
pub fn valid_media_src<'a>(src: &'a str, fallback: &'a str) -> &'a str {
    if is_valid_media_path(src) {
        src
    } else {
        fallback
    }
}

/// What a media slot should display right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaView {
    Image {
        src: String,
        alt: String,
        /// Placeholder stays visible underneath until the image reports a load.
        loaded: bool,
    },
    /// Always autoplaying, looping, muted and inline.
    Video { src: String },
    /// Caller-supplied fallback markup.
    Custom(String),
    Placeholder,
}

impl MediaView {
    pub const PLACEHOLDER_LABEL: &'static str = "Media unavailable";
}

/// Render state for one media slot.
///
/// Tracks load errors so the slot switches to its fallback exactly once and
/// never retries the primary source.
#[derive(Debug, Clone)]
pub struct MediaRenderer {
    item: MediaItem,
    fallback_src: Option<String>,
    fallback_markup: Option<String>,
    has_error: bool,
    is_loaded: bool,
}

impl MediaRenderer {
    #[must_use]
    pub fn new(item: MediaItem) -> Self {
        Self {
            item,
            fallback_src: None,
            fallback_markup: None,
            has_error: false,
            is_loaded: false,
        }
    }

    /// Source to use when the primary source is invalid or failed to load.
    #[must_use]
    pub fn with_fallback_src(mut self, src: impl Into<String>) -> Self {
        self.fallback_src = Some(src.into()).filter(|s: &String| !s.is_empty());
        self
    }

    /// Markup rendered instead of the default placeholder.
    #[must_use]
    pub fn with_fallback_markup(mut self, markup: impl Into<String>) -> Self {
        self.fallback_markup = Some(markup.into());
        self
    }

    #[must_use]
    pub fn effective_src(&self) -> Option<&str> {
        if !self.has_error {
            if let Some(src) = self.item.valid_src() {
                return Some(src);
            }
        }
        self.fallback_src.as_deref()
    }

    #[must_use]
    pub fn view(&self) -> MediaView {
        let Some(src) = self.effective_src() else {
            return match &self.fallback_markup {
                Some(markup) => MediaView::Custom(markup.clone()),
                None => MediaView::Placeholder,
            };
        };

        match self.item.kind {
            MediaKind::Video => MediaView::Video {
                src: src.to_string(),
            },
            MediaKind::Image => MediaView::Image {
                src: src.to_string(),
                alt: self.item.alt.clone(),
                loaded: self.is_loaded,
            },
        }
    }

    /// Records a load failure. Returns `true` only for the first failure.
    pub fn on_load_error(&mut self) -> bool {
        if self.has_error {
            return false;
        }
        tracing::warn!(src = %self.item.src, "failed to load media");
        self.has_error = true;
        true
    }

    pub fn on_loaded(&mut self) {
        self.is_loaded = true;
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.has_error
    }
}

#[cfg(test)]
#[path = "media_test.rs"]
mod tests;
