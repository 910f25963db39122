//! Reshapes spreadsheet rows into the page content records.
//!
//! Layout of the CMS spreadsheet:
//!
//! | Sheet    | Row 1                           | Rows 2..                                   |
//! |----------|---------------------------------|--------------------------------------------|
//! | Hero     | tagline … secondary link, media | (unused)                                   |
//! | Services | tagline, title, highlight       | title, subtitle, description, type, src, alt |
//! | Gallery  | tagline, title, highlight       | type, src, alt                             |
//!
//! The values API drops trailing empty cells, so every lookup treats a missing
//! cell as `""`.

use barbershop_core::{
    GalleryContent, HeroContent, MediaItem, MediaKind, ServiceItem, ServicesContent, SiteContent,
};

/// A1 ranges read for one `/api/cms` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CmsRanges {
    pub hero: &'static str,
    pub services_meta: &'static str,
    pub services_items: &'static str,
    pub gallery_meta: &'static str,
    pub gallery_items: &'static str,
}

pub const CMS_RANGES: CmsRanges = CmsRanges {
    hero: "Hero!A1:K1",
    services_meta: "Services!A1:C1",
    services_items: "Services!A2:F",
    gallery_meta: "Gallery!A1:C1",
    gallery_items: "Gallery!A2:C",
};

fn cell(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

fn media(row: &[String], start: usize, default_kind: MediaKind) -> MediaItem {
    MediaItem {
        kind: MediaKind::from_cell(&cell(row, start), default_kind),
        src: cell(row, start + 1),
        alt: cell(row, start + 2),
    }
}

/// Builds the hero record from the single `Hero!A1:K1` row.
///
/// The hero media kind defaults to video.
#[must_use]
pub fn hero_from_row(row: &[String]) -> HeroContent {
    HeroContent {
        tagline: cell(row, 0),
        title: cell(row, 1),
        title_highlight: cell(row, 2),
        description: cell(row, 3),
        primary_button_text: cell(row, 4),
        primary_button_link: cell(row, 5),
        secondary_button_text: cell(row, 6),
        secondary_button_link: cell(row, 7),
        media: media(row, 8, MediaKind::Video),
    }
}

#[must_use]
pub fn services_from_rows(meta: &[String], rows: &[Vec<String>]) -> ServicesContent {
    ServicesContent {
        tagline: cell(meta, 0),
        title: cell(meta, 1),
        title_highlight: cell(meta, 2),
        items: rows
            .iter()
            .map(|row| ServiceItem {
                title: cell(row, 0),
                subtitle: cell(row, 1),
                description: cell(row, 2),
                media: media(row, 3, MediaKind::Image),
            })
            .collect(),
    }
}

#[must_use]
pub fn gallery_from_rows(meta: &[String], rows: &[Vec<String>]) -> GalleryContent {
    GalleryContent {
        tagline: cell(meta, 0),
        title: cell(meta, 1),
        title_highlight: cell(meta, 2),
        items: rows
            .iter()
            .map(|row| media(row, 0, MediaKind::Image))
            .collect(),
    }
}

/// Raw values for every range in [`CMS_RANGES`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CmsSheetValues {
    pub hero: Vec<Vec<String>>,
    pub services_meta: Vec<Vec<String>>,
    pub services_items: Vec<Vec<String>>,
    pub gallery_meta: Vec<Vec<String>>,
    pub gallery_items: Vec<Vec<String>>,
}

fn first_row(rows: &[Vec<String>]) -> &[String] {
    rows.first().map_or(&[], Vec::as_slice)
}

impl CmsSheetValues {
    #[must_use]
    pub fn into_site_content(self) -> SiteContent {
        SiteContent {
            hero: hero_from_row(first_row(&self.hero)),
            services: services_from_rows(first_row(&self.services_meta), &self.services_items),
            gallery: gallery_from_rows(first_row(&self.gallery_meta), &self.gallery_items),
        }
    }
}
