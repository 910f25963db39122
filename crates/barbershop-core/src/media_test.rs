use super::*;

#[test]
fn images_path_is_valid() {
    assert!(is_valid_media_path("/Images/x.jpg"));
}

#[test]
fn uploads_and_http_paths_are_valid() {
    assert!(is_valid_media_path("/uploads/hero-video.mp4"));
    assert!(is_valid_media_path("https://cdn.example.com/a.png"));
    assert!(is_valid_media_path("http://cdn.example.com/a.png"));
}

#[test]
fn ftp_path_is_rejected() {
    assert!(!is_valid_media_path("ftp://x"));
}

#[test]
fn empty_and_blank_paths_are_rejected() {
    assert!(!is_valid_media_path(""));
    assert!(!is_valid_media_path("   "));
}

#[test]
fn prefix_match_is_case_sensitive() {
    assert!(!is_valid_media_path("/images/x.jpg"));
    assert!(!is_valid_media_path("images/x.jpg"));
}

#[test]
fn valid_media_src_substitutes_fallback() {
    assert_eq!(valid_media_src("javascript:alert(1)", "/Images/f.jpg"), "/Images/f.jpg");
    assert_eq!(valid_media_src("/Images/a.jpg", "/Images/f.jpg"), "/Images/a.jpg");
    assert_eq!(valid_media_src("", ""), "");
}

#[test]
fn invalid_source_renders_placeholder() {
    let renderer = MediaRenderer::new(MediaItem::image("data:image/png;base64,AAAA", "x"));
    assert_eq!(renderer.view(), MediaView::Placeholder);
}

#[test]
fn invalid_source_prefers_custom_markup_over_placeholder() {
    let renderer = MediaRenderer::new(MediaItem::image("", "x"))
        .with_fallback_markup("<div class=\"poster\"></div>");
    assert_eq!(
        renderer.view(),
        MediaView::Custom("<div class=\"poster\"></div>".to_string())
    );
}

#[test]
fn invalid_source_uses_fallback_src() {
    let renderer =
        MediaRenderer::new(MediaItem::image("ftp://x", "alt")).with_fallback_src("/Images/f.jpg");
    assert_eq!(
        renderer.view(),
        MediaView::Image {
            src: "/Images/f.jpg".to_string(),
            alt: "alt".to_string(),
            loaded: false,
        }
    );
}

#[test]
fn video_renders_video_view() {
    let renderer = MediaRenderer::new(MediaItem::video("/uploads/hero.mp4", ""));
    assert_eq!(
        renderer.view(),
        MediaView::Video {
            src: "/uploads/hero.mp4".to_string()
        }
    );
}

#[test]
fn load_error_switches_to_placeholder_once() {
    let mut renderer = MediaRenderer::new(MediaItem::image("/Images/missing.jpg", "m"));
    assert!(matches!(renderer.view(), MediaView::Image { .. }));

    assert!(renderer.on_load_error());
    assert!(renderer.has_error());
    assert_eq!(renderer.view(), MediaView::Placeholder);

    // a second error event is ignored
    assert!(!renderer.on_load_error());
    assert_eq!(renderer.view(), MediaView::Placeholder);
}

#[test]
fn load_error_switches_to_fallback_src() {
    let mut renderer = MediaRenderer::new(MediaItem::video("/uploads/broken.mp4", ""))
        .with_fallback_src("/uploads/backup.mp4");
    renderer.on_load_error();
    assert_eq!(renderer.effective_src(), Some("/uploads/backup.mp4"));
}

#[test]
fn loaded_image_reports_loaded() {
    let mut renderer = MediaRenderer::new(MediaItem::image("/Images/a.jpg", "a"));
    renderer.on_loaded();
    assert!(matches!(renderer.view(), MediaView::Image { loaded: true, .. }));
}

#[test]
fn empty_fallback_src_is_ignored() {
    let renderer = MediaRenderer::new(MediaItem::image("", "a")).with_fallback_src("");
    assert_eq!(renderer.view(), MediaView::Placeholder);
}
