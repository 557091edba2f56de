use super::helpers::{
    TestMailer, expect_status, json_request, read_json, send, spawn_app, spawn_app_with,
    test_config, tiny_png_data_url,
};
use art_review_api::config::Config;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};

const SUBMIT: &str = "/api/v1/reviews";
const LEGACY_SUBMIT: &str = "/.netlify/functions/submit-review";

fn jane_doe_payload() -> Value {
    json!({
        "reviewerName": "Jane Doe",
        "responses": {
            "impr-3": { "rating": "yes", "comment": "Love the light" },
            "surr-10": { "rating": "no" }
        }
    })
}

#[tokio::test]
async fn submission_is_mailed_with_csv_and_json() {
    let test = spawn_app();

    let res = send(&test.app, json_request("POST", LEGACY_SUBMIT, &jane_doe_payload())).await;
    let res = expect_status(res, StatusCode::OK).await;
    assert_eq!(
        res.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body: Value = read_json(res).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Review submitted successfully");
    assert_eq!(body["uploadedImages"], 0);
    assert_eq!(body["imageUrls"], json!([]));

    let sent = test.sent();
    assert_eq!(sent.len(), 1);
    let message = &sent[0];
    assert_eq!(message.to, "curator@example.com");
    assert_eq!(message.subject, "Art Review Submission from Jane Doe");
    assert!(message.html.contains("Love the light"));

    let csv = String::from_utf8(message.attachments[0].content.clone()).expect("csv is utf8");
    let impressionist = csv
        .find("\"Impressionist\",\"impr-3\",\"yes\",\"Love the light\"")
        .expect("impressionist row");
    let surrealism = csv
        .find("\"Surrealism\",\"surr-10\",\"no\"")
        .expect("surrealism row");
    assert!(impressionist < surrealism);
    assert!(csv.contains("Thumbs Up (Yes),1"));
    assert!(csv.contains("Thumbs Down (No),1"));
    assert!(!csv.contains("--- UPLOADED REFERENCE IMAGES ---"));

    let backup: Value =
        serde_json::from_slice(&message.attachments[1].content).expect("backup is json");
    assert_eq!(backup["reviewerName"], "Jane Doe");
    assert_eq!(backup["responses"]["surr-10"]["rating"], "no");
}

#[tokio::test]
async fn missing_name_is_rejected_without_side_effects() {
    let test = spawn_app();
    let payload = json!({
        "reviewerName": "",
        "responses": { "abs-1": { "rating": "yes" } },
        "uploadedImages": [{ "name": "a.png", "type": "image/png", "data": tiny_png_data_url() }]
    });

    let res = send(&test.app, json_request("POST", SUBMIT, &payload)).await;
    let res = expect_status(res, StatusCode::BAD_REQUEST).await;
    let body: Value = read_json(res).await;

    assert_eq!(body, json!({ "error": "Missing required fields" }));
    assert!(test.sent().is_empty());
    assert!(test.images.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_responses_is_rejected() {
    let test = spawn_app();
    let res = send(
        &test.app,
        json_request("POST", SUBMIT, &json!({ "reviewerName": "Jane Doe" })),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::BAD_REQUEST).await).await;
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let test = spawn_app();
    let mut payload = jane_doe_payload();
    payload["reviewerEmail"] = json!("not-an-email");

    let res = send(&test.app, json_request("POST", SUBMIT, &payload)).await;
    expect_status(res, StatusCode::BAD_REQUEST).await;
    assert!(test.sent().is_empty());
}

#[tokio::test]
async fn unparseable_body_is_a_bad_request() {
    let test = spawn_app();
    let req = Request::builder()
        .method("POST")
        .uri(SUBMIT)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("failed to build request");

    let res = expect_status(send(&test.app, req).await, StatusCode::BAD_REQUEST).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["error"], "Invalid request body");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn unknown_rating_is_a_bad_request() {
    let test = spawn_app();
    let payload = json!({
        "reviewerName": "Jane Doe",
        "responses": { "abs-1": { "rating": "love-it" } }
    });

    let res = send(&test.app, json_request("POST", SUBMIT, &payload)).await;
    let body: Value = read_json(expect_status(res, StatusCode::BAD_REQUEST).await).await;
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let test = spawn_app();
    for method in ["GET", "PUT", "DELETE"] {
        let req = Request::builder()
            .method(method)
            .uri(LEGACY_SUBMIT)
            .header(header::ORIGIN, "https://review.example.org")
            .body(Body::empty())
            .expect("failed to build request");

        let res = expect_status(send(&test.app, req).await, StatusCode::METHOD_NOT_ALLOWED).await;
        assert_eq!(
            res.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        let body: Value = read_json(res).await;
        assert_eq!(body, json!({ "error": "Method not allowed" }));
    }
}

#[tokio::test]
async fn preflight_allows_cross_origin_posts() {
    let test = spawn_app();
    let req = Request::builder()
        .method("OPTIONS")
        .uri(SUBMIT)
        .header(header::ORIGIN, "https://review.example.org")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .expect("failed to build request");

    let res = expect_status(send(&test.app, req).await, StatusCode::OK).await;
    let headers = res.headers();
    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase()
    };
    assert_eq!(header_str(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    assert!(header_str(header::ACCESS_CONTROL_ALLOW_METHODS).contains("post"));
    assert!(header_str(header::ACCESS_CONTROL_ALLOW_HEADERS).contains("content-type"));
}

#[tokio::test]
async fn bare_options_is_answered() {
    let test = spawn_app();
    let req = Request::builder()
        .method("OPTIONS")
        .uri(LEGACY_SUBMIT)
        .body(Body::empty())
        .expect("failed to build request");

    expect_status(send(&test.app, req).await, StatusCode::OK).await;
}

#[tokio::test]
async fn failed_image_is_skipped_and_order_kept() {
    let test = spawn_app();
    let mut payload = jane_doe_payload();
    payload["uploadedImages"] = json!([
        { "name": "first.png", "type": "image/png", "data": tiny_png_data_url() },
        { "name": "fail.png", "type": "image/png", "data": tiny_png_data_url() },
        { "name": "third.png", "type": "image/png", "data": tiny_png_data_url() }
    ]);

    let res = send(&test.app, json_request("POST", SUBMIT, &payload)).await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["uploadedImages"], 2);
    assert_eq!(
        body["imageUrls"],
        json!([
            "https://test-images.local/art-review-submissions/jane-doe/first.png",
            "https://test-images.local/art-review-submissions/jane-doe/third.png"
        ])
    );

    let sent = test.sent();
    let csv = String::from_utf8(sent[0].attachments[0].content.clone()).expect("csv is utf8");
    assert!(csv.contains("--- UPLOADED REFERENCE IMAGES ---"));
    assert!(csv.contains(
        "Image 2,https://test-images.local/art-review-submissions/jane-doe/third.png"
    ));
}

#[tokio::test]
async fn mail_outage_still_reports_success() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config {
        submission_log_dir: Some(dir.path().to_path_buf()),
        ..test_config()
    };
    let test = spawn_app_with(
        config,
        TestMailer {
            broken: true,
            ..TestMailer::default()
        },
    );

    let res = send(&test.app, json_request("POST", SUBMIT, &jane_doe_payload())).await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;

    assert_eq!(body["success"], true);
    assert_eq!(
        std::fs::read_dir(dir.path()).expect("log dir").count(),
        2,
        "csv and json should be archived"
    );
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let test = spawn_app();
    let mut payload = jane_doe_payload();
    payload["additionalFeedback"] = json!("x".repeat(128 * 1024));

    let res = send(&test.app, json_request("POST", SUBMIT, &payload)).await;
    let body: Value = read_json(expect_status(res, StatusCode::PAYLOAD_TOO_LARGE).await).await;
    assert_eq!(body["error"], "Request body too large");
    assert!(test.sent().is_empty());
}

#[tokio::test]
async fn request_id_is_echoed() {
    let test = spawn_app();
    let mut req = json_request("POST", SUBMIT, &jane_doe_payload());
    req.headers_mut()
        .insert("x-request-id", "review-123".parse().expect("header value"));

    let res = expect_status(send(&test.app, req).await, StatusCode::OK).await;
    assert_eq!(
        res.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("review-123")
    );
}
