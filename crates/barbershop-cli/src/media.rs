//! `media` commands: check a source against the allowed prefixes.

use barbershop_core::media::VALID_MEDIA_PREFIXES;
use barbershop_core::{is_valid_media_path, MediaItem, MediaKind, MediaRenderer, MediaView};
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum MediaCommands {
    /// Report whether a media source is allowed and what would render
    Check {
        src: String,
        /// Treat the source as a video
        #[arg(long)]
        video: bool,
        /// Fallback source used when `src` is rejected
        #[arg(long)]
        fallback: Option<String>,
    },
}

pub(crate) fn run_media(command: &MediaCommands) {
    match command {
        MediaCommands::Check {
            src,
            video,
            fallback,
        } => println!("{}", check_report(src, *video, fallback.as_deref())),
    }
}

pub(crate) fn check_report(src: &str, video: bool, fallback: Option<&str>) -> String {
    let kind = if video { MediaKind::Video } else { MediaKind::Image };
    let mut renderer = MediaRenderer::new(MediaItem {
        kind,
        src: src.to_string(),
        alt: String::new(),
    });
    if let Some(fallback) = fallback {
        renderer = renderer.with_fallback_src(fallback);
    }

    let verdict = if is_valid_media_path(src) {
        "valid".to_string()
    } else {
        format!("invalid (allowed prefixes: {})", VALID_MEDIA_PREFIXES.join(", "))
    };
    let renders = match renderer.view() {
        MediaView::Image { src, .. } => format!("image {src}"),
        MediaView::Video { src } => format!("video {src} (autoplay, loop, muted, inline)"),
        MediaView::Custom(markup) => format!("custom fallback {markup}"),
        MediaView::Placeholder => format!("placeholder \"{}\"", MediaView::PLACEHOLDER_LABEL),
    };

    format!("{src}: {verdict}\nrenders: {renders}")
}
