//! Integration tests for `ContentClient` using wiremock HTTP mocks.

use barbershop_content::ContentClient;
use barbershop_core::{ContentKey, GalleryContent, HeroContent, MediaKind, ServicesContent};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> ContentClient {
    ContentClient::new(&format!("{base_url}/content"), 5, "barbershop-test/0.1")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn hero_document_is_parsed() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "tagline": "Since 2014",
        "title": "THE BARBER",
        "titleHighlight": "SHOP",
        "description": "Cuts that last.",
        "primaryButtonText": "Book",
        "primaryButtonLink": "#booking",
        "secondaryButtonText": "Services",
        "secondaryButtonLink": "#services",
        "media": { "type": "image", "src": "/uploads/hero.jpg", "alt": "Chair" }
    });

    Mock::given(method("GET"))
        .and(path("/content/hero.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let hero = client.hero().await;

    assert_eq!(hero.tagline, "Since 2014");
    assert_eq!(hero.title_highlight, "SHOP");
    assert_eq!(hero.media.kind, MediaKind::Image);
    assert_eq!(hero.media.src, "/uploads/hero.jpg");
}

#[tokio::test]
async fn missing_document_falls_back_to_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/services.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.fetch(ContentKey::Services).await.is_none());
    assert_eq!(client.services().await, ServicesContent::defaults());
}

#[tokio::test]
async fn array_payload_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/gallery.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2, 3])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.fetch(ContentKey::Gallery).await.is_none());
    assert_eq!(client.gallery().await, GalleryContent::defaults());
}

#[tokio::test]
async fn invalid_json_falls_back_to_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/hero.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert_eq!(client.hero().await, HeroContent::defaults());
    assert!(!client.is_cached(ContentKey::Hero).await);
}

#[tokio::test]
async fn successful_fetch_is_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/hero.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "title": "CACHED" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let first = client.fetch(ContentKey::Hero).await.expect("first fetch");
    let second = client.fetch(ContentKey::Hero).await.expect("cached fetch");

    assert_eq!(first, second);
    assert_eq!(second["title"], "CACHED");
    assert!(client.is_cached(ContentKey::Hero).await);

    // Clones share the cache.
    let clone = client.clone();
    assert_eq!(clone.hero().await.title, "CACHED");
}

#[tokio::test]
async fn failed_fetch_is_retried_on_next_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/gallery.json"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/content/gallery.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "title": "Fresh",
                "items": [{ "type": "image", "src": "/Images/a.jpg", "alt": "A" }]
            })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.fetch(ContentKey::Gallery).await.is_none());
    assert!(!client.is_cached(ContentKey::Gallery).await);

    let gallery = client.gallery().await;
    assert_eq!(gallery.title, "Fresh");
    assert_eq!(gallery.items.len(), 1);
    assert_eq!(gallery.tagline, "");
}

#[tokio::test]
async fn site_loads_each_document_independently() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/hero.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "title": "LIVE" })),
        )
        .mount(&server)
        .await;

    // services.json and gallery.json are unmatched and return 404.
    let client = test_client(&server.uri());
    let site = client.site().await;

    assert_eq!(site.hero.title, "LIVE");
    assert_eq!(site.services, ServicesContent::defaults());
    assert_eq!(site.gallery, GalleryContent::defaults());
}

#[tokio::test]
async fn unreachable_host_yields_none() {
    // Port 9 (discard) on localhost is not expected to accept HTTP.
    let client = ContentClient::new("http://127.0.0.1:9/content", 2, "barbershop-test/0.1")
        .expect("client construction should not fail");
    assert!(client.fetch(ContentKey::Hero).await.is_none());
    assert_eq!(client.hero().await, HeroContent::defaults());
}
