//! Integration tests for `SheetsClient` and `WebhookClient` using wiremock.

use barbershop_core::{
    BookingDraft, FranchiseInquiry, MediaKind, SheetsAuth, SheetsConfig, WebhookConfig,
};
use barbershop_sheets::{SheetsClient, SheetsError, Submission, WebhookClient};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SHEET: &str = "sheet-123";

fn sheets_client(base_url: &str, auth: SheetsAuth) -> SheetsClient {
    let config = SheetsConfig {
        spreadsheet_id: SHEET.to_string(),
        auth,
        base_url: base_url.to_string(),
    };
    SheetsClient::new(&config, 5, "barbershop-test/0.1")
        .expect("client construction should not fail")
        .with_retry(2, 0)
}

fn range_path(range: &str) -> String {
    format!("/spreadsheets/{SHEET}/values/{range}")
}

async fn mount_range(server: &MockServer, range: &str, values: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(range_path(range)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": values
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn values_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(range_path("Hero!A1:K1")))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "range": "Hero!A1:K1",
            "values": [["Since 2014", "THE BARBER"]]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = sheets_client(&server.uri(), SheetsAuth::Bearer("tok-1".into()));
    let rows = client.values("Hero!A1:K1").await.expect("values");

    assert_eq!(rows, vec![vec!["Since 2014".to_string(), "THE BARBER".to_string()]]);
}

#[tokio::test]
async fn values_sends_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(range_path("Gallery!A2:C")))
        .and(query_param("key", "k-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "range": "Gallery!A2:C"
        })))
        .mount(&server)
        .await;

    let client = sheets_client(&server.uri(), SheetsAuth::ApiKey("k-9".into()));
    let rows = client.values("Gallery!A2:C").await.expect("values");

    assert!(rows.is_empty(), "missing `values` means an empty range");
}

#[tokio::test]
async fn site_content_is_assembled_from_all_ranges() {
    let server = MockServer::start().await;

    mount_range(
        &server,
        "Hero!A1:K1",
        serde_json::json!([["Tag", "Title", "Hi", "Desc", "Book", "#b", "More", "#s"]]),
    )
    .await;
    mount_range(&server, "Services!A1:C1", serde_json::json!([["What", "Pick", "Service"]])).await;
    mount_range(
        &server,
        "Services!A2:F",
        serde_json::json!([
            ["Haircut", "Men", "Fades", "image", "/Images/cut.jpg", "Cut"],
            ["Facial"]
        ]),
    )
    .await;
    mount_range(&server, "Gallery!A1:C1", serde_json::json!([["See", "Real", "Work"]])).await;
    mount_range(
        &server,
        "Gallery!A2:C",
        serde_json::json!([["", "/Images/a.jpg", "A"], ["video", "/uploads/b.mp4", "B"]]),
    )
    .await;

    let client = sheets_client(&server.uri(), SheetsAuth::Bearer("tok".into()));
    let site = client.fetch_site_content().await.expect("site content");

    assert_eq!(site.hero.tagline, "Tag");
    assert_eq!(site.hero.media.kind, MediaKind::Video);
    assert_eq!(site.hero.media.src, "");
    assert_eq!(site.services.items.len(), 2);
    assert_eq!(site.services.items[1].title, "Facial");
    assert_eq!(site.services.items[1].media.kind, MediaKind::Image);
    assert_eq!(site.gallery.title_highlight, "Work");
    assert_eq!(site.gallery.items[1].kind, MediaKind::Video);
}

#[tokio::test]
async fn forbidden_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client = sheets_client(&server.uri(), SheetsAuth::Bearer("expired".into()));
    let result = client.values("Hero!A1:K1").await;

    match result {
        Err(SheetsError::Http(e)) => assert_eq!(e.status().map(|s| s.as_u16()), Some(403)),
        other => panic!("expected HTTP 403, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(range_path("Hero!A1:K1")))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_range(&server, "Hero!A1:K1", serde_json::json!([["Back"]])).await;

    let client = sheets_client(&server.uri(), SheetsAuth::Bearer("tok".into()));
    let rows = client.values("Hero!A1:K1").await.expect("retry should recover");

    assert_eq!(rows[0][0], "Back");
}

#[tokio::test]
async fn malformed_values_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "values": "nope" })),
        )
        .mount(&server)
        .await;

    let client = sheets_client(&server.uri(), SheetsAuth::Bearer("tok".into()));
    let result = client.values("Hero!A1:K1").await;

    assert!(matches!(result, Err(SheetsError::Deserialize { .. })));
}

fn webhook_client(endpoint: &str) -> WebhookClient {
    WebhookClient::new(
        &WebhookConfig {
            endpoint: endpoint.to_string(),
            secret: "shared".to_string(),
        },
        5,
        "barbershop-test/0.1",
    )
    .expect("client construction should not fail")
}

#[tokio::test]
async fn webhook_posts_text_plain_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exec"))
        .and(header("content-type", "text/plain;charset=utf-8"))
        .and(body_string_contains("\"secret\":\"shared\""))
        .and(body_string_contains("\"type\":\"franchise\""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = webhook_client(&format!("{}/exec", server.uri()));
    let inquiry = FranchiseInquiry {
        full_name: "Asha".to_string(),
        ..FranchiseInquiry::default()
    };
    client
        .post(&Submission::Franchise(inquiry))
        .await
        .expect("post should succeed");
}

#[tokio::test]
async fn detached_submission_swallows_failures() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = webhook_client(&format!("{}/exec", server.uri()));
    let handle = client.submit_detached(Submission::Booking(BookingDraft::default()));

    handle.await.expect("task should complete without panicking");
}
