//! Page content records served by the content host and the sheet-backed CMS.
//!
//! Field names follow the JSON wire format (`camelCase`). Every field carries a
//! serde default so partially filled documents still deserialize; the
//! `default_*` constructors hold the copy shown when no content host answers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifies one of the three editable content documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKey {
    Hero,
    Services,
    Gallery,
}

impl ContentKey {
    pub const ALL: [ContentKey; 3] = [ContentKey::Hero, ContentKey::Services, ContentKey::Gallery];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKey::Hero => "hero",
            ContentKey::Services => "services",
            ContentKey::Gallery => "gallery",
        }
    }

    /// File name of the document on the static content host.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl std::fmt::Display for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hero" => Ok(ContentKey::Hero),
            "services" => Ok(ContentKey::Services),
            "gallery" => Ok(ContentKey::Gallery),
            other => Err(format!("unknown content key '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    /// Parses a sheet cell, falling back to `default` for blank or unknown values.
    #[must_use]
    pub fn from_cell(cell: &str, default: MediaKind) -> MediaKind {
        match cell.trim().to_ascii_lowercase().as_str() {
            "image" => MediaKind::Image,
            "video" => MediaKind::Video,
            _ => default,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub src: String,
    pub alt: String,
}

impl MediaItem {
    #[must_use]
    pub fn image(src: &str, alt: &str) -> Self {
        Self {
            kind: MediaKind::Image,
            src: src.to_string(),
            alt: alt.to_string(),
        }
    }

    #[must_use]
    pub fn video(src: &str, alt: &str) -> Self {
        Self {
            kind: MediaKind::Video,
            src: src.to_string(),
            alt: alt.to_string(),
        }
    }

    /// `src` if it passes the media allow-list, otherwise `None`.
    #[must_use]
    pub fn valid_src(&self) -> Option<&str> {
        crate::media::is_valid_media_path(&self.src).then_some(self.src.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroContent {
    pub tagline: String,
    pub title: String,
    pub title_highlight: String,
    pub description: String,
    pub primary_button_text: String,
    pub primary_button_link: String,
    pub secondary_button_text: String,
    pub secondary_button_link: String,
    pub media: MediaItem,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceItem {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub media: MediaItem,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicesContent {
    pub tagline: String,
    pub title: String,
    pub title_highlight: String,
    pub items: Vec<ServiceItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryContent {
    pub tagline: String,
    pub title: String,
    pub title_highlight: String,
    pub items: Vec<MediaItem>,
}

/// All three documents, as returned by the sheet-backed `/api/cms` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    pub hero: HeroContent,
    pub services: ServicesContent,
    pub gallery: GalleryContent,
}

impl SiteContent {
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            hero: HeroContent::defaults(),
            services: ServicesContent::defaults(),
            gallery: GalleryContent::defaults(),
        }
    }
}

impl HeroContent {
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            tagline: "Indore's Most Trusted Salon Since 2014".to_string(),
            title: "THE BARBER".to_string(),
            title_highlight: "SHOP".to_string(),
            description: "5,000+ clients trust us for a reason. Expert cuts, premium facials, \
                          zero compromise. Your look, perfected."
                .to_string(),
            primary_button_text: "Book Now".to_string(),
            primary_button_link: "#booking".to_string(),
            secondary_button_text: "See What We Do".to_string(),
            secondary_button_link: "#services".to_string(),
            media: MediaItem::video("/uploads/hero-video.mp4", "The Barber Shop Hero"),
        }
    }
}

impl ServicesContent {
    #[must_use]
    pub fn defaults() -> Self {
        let service = |title: &str, subtitle: &str, description: &str, src: &str, alt: &str| {
            ServiceItem {
                title: title.to_string(),
                subtitle: subtitle.to_string(),
                description: description.to_string(),
                media: MediaItem::image(src, alt),
            }
        };

        Self {
            tagline: "What We Do Best".to_string(),
            title: "Pick Your".to_string(),
            title_highlight: "Service".to_string(),
            items: vec![
                service(
                    "Haircut",
                    "Men & Women",
                    "Clean fades, classic cuts, or something new. Tell us what you want and \
                     we'll make it happen.",
                    "https://images.unsplash.com/photo-1605497788044-5a32c7078486?w=600&q=80",
                    "Haircut service",
                ),
                service(
                    "Facial",
                    "Deep Clean",
                    "Tired skin? Dull face? Our facials clear out the gunk and bring back the glow.",
                    "https://images.unsplash.com/photo-1570172619644-dfd03ed5d881?w=600&q=80",
                    "Facial service",
                ),
                service(
                    "Hydrafacial",
                    "Premium",
                    "The real deal. Medical-grade hydration that you'll see and feel instantly.",
                    "https://images.unsplash.com/photo-1616394584738-fc6e612e71b9?w=600&q=80",
                    "Hydrafacial service",
                ),
                service(
                    "Pedicure & Manicure",
                    "Full Service",
                    "Hands and feet done right. Professional care, not a quick polish job.",
                    "https://images.unsplash.com/photo-1604654894610-df63bc536371?w=600&q=80",
                    "Pedicure and Manicure service",
                ),
            ],
        }
    }
}

impl GalleryContent {
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            tagline: "See The Results".to_string(),
            title: "Real".to_string(),
            title_highlight: "Work".to_string(),
            items: (1..=4)
                .map(|n| {
                    MediaItem::image(
                        &format!("/Images/BarberShop-img/img-{n}.jpg"),
                        &format!("Haircut transformation {n}"),
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_key_parses_case_insensitively() {
        assert_eq!("Hero".parse::<ContentKey>(), Ok(ContentKey::Hero));
        assert_eq!(" gallery ".parse::<ContentKey>(), Ok(ContentKey::Gallery));
        assert!("pricing".parse::<ContentKey>().is_err());
    }

    #[test]
    fn content_key_file_name() {
        assert_eq!(ContentKey::Services.file_name(), "services.json");
    }

    #[test]
    fn hero_deserializes_wire_names() {
        let json = serde_json::json!({
            "tagline": "Since 2014",
            "titleHighlight": "SHOP",
            "primaryButtonLink": "#booking",
            "media": { "type": "video", "src": "/uploads/a.mp4", "alt": "clip" }
        });
        let hero: HeroContent = serde_json::from_value(json).expect("hero parses");
        assert_eq!(hero.tagline, "Since 2014");
        assert_eq!(hero.title_highlight, "SHOP");
        assert_eq!(hero.primary_button_link, "#booking");
        assert_eq!(hero.media.kind, MediaKind::Video);
        // absent fields become empty at the consumer
        assert_eq!(hero.title, "");
        assert_eq!(hero.secondary_button_text, "");
    }

    #[test]
    fn gallery_without_items_has_empty_list() {
        let gallery: GalleryContent =
            serde_json::from_value(serde_json::json!({ "title": "Real" })).expect("parses");
        assert!(gallery.items.is_empty());
        assert_eq!(gallery.title, "Real");
    }

    #[test]
    fn media_item_without_alt_defaults_to_empty() {
        let item: MediaItem =
            serde_json::from_value(serde_json::json!({ "type": "image", "src": "/Images/a.jpg" }))
                .expect("parses");
        assert_eq!(item.alt, "");
        assert_eq!(item.valid_src(), Some("/Images/a.jpg"));
    }

    #[test]
    fn media_item_with_disallowed_src_has_no_valid_src() {
        let item = MediaItem::image("ftp://files/a.jpg", "a");
        assert_eq!(item.valid_src(), None);
    }

    #[test]
    fn media_kind_from_cell_uses_default_for_blank() {
        assert_eq!(MediaKind::from_cell("", MediaKind::Video), MediaKind::Video);
        assert_eq!(MediaKind::from_cell("IMAGE", MediaKind::Video), MediaKind::Image);
        assert_eq!(MediaKind::from_cell("gif", MediaKind::Image), MediaKind::Image);
    }

    #[test]
    fn default_content_media_is_all_valid() {
        let site = SiteContent::defaults();
        assert!(site.hero.media.valid_src().is_some());
        assert_eq!(site.services.items.len(), 4);
        assert!(site.services.items.iter().all(|s| s.media.valid_src().is_some()));
        assert_eq!(site.gallery.items.len(), 4);
        assert_eq!(site.gallery.items[3].src, "/Images/BarberShop-img/img-4.jpg");
    }

    #[test]
    fn hero_serializes_camel_case() {
        let json = serde_json::to_value(HeroContent::defaults()).expect("serialize");
        assert_eq!(json["titleHighlight"], "SHOP");
        assert_eq!(json["media"]["type"], "video");
    }
}
