use art_review_api::{
    config::Config,
    infrastructure::{
        mail::traits::{EmailMessage, EmailSender},
        storage::traits::{ImageHost, ImageUpload},
    },
    presentation::http::{routes::create_router, state::AppState},
};
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Hosts every image except those whose name contains `fail`.
#[derive(Clone, Default)]
pub struct TestImageHost {
    pub uploads: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ImageHost for TestImageHost {
    async fn upload(&self, upload: ImageUpload) -> anyhow::Result<String> {
        if upload.file_name.contains("fail") {
            anyhow::bail!("test host refused {}", upload.file_name);
        }
        let url = format!(
            "https://test-images.local/{}/{}",
            upload.folder, upload.file_name
        );
        self.uploads
            .lock()
            .expect("uploads lock poisoned")
            .push(url.clone());
        Ok(url)
    }
}

/// Records messages, or fails every send when `broken` is set.
#[derive(Clone, Default)]
pub struct TestMailer {
    pub sent: Arc<Mutex<Vec<EmailMessage>>>,
    pub broken: bool,
}

#[async_trait]
impl EmailSender for TestMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        if self.broken {
            anyhow::bail!("403 Forbidden: sender identity not verified");
        }
        self.sent
            .lock()
            .expect("sent lock poisoned")
            .push(message.clone());
        Ok(())
    }
}

pub struct TestApp {
    pub app: Router,
    pub images: TestImageHost,
    pub mailer: TestMailer,
}

impl TestApp {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.mailer.sent.lock().expect("sent lock poisoned").clone()
    }
}

pub fn test_config() -> Config {
    Config {
        notification_email: Some("curator@example.com".to_string()),
        sendgrid_api_key: Some("SG.test".to_string()),
        max_body_bytes: 64 * 1024,
        ..Config::default()
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(test_config(), TestMailer::default())
}

pub fn spawn_app_with(config: Config, mailer: TestMailer) -> TestApp {
    let images = TestImageHost::default();
    let state = AppState::with_collaborators(
        config,
        Some(Arc::new(images.clone()) as Arc<dyn ImageHost>),
        Some(Arc::new(mailer.clone()) as Arc<dyn EmailSender>),
    )
    .expect("failed to build app state");

    TestApp {
        app: create_router(state),
        images,
        mailer,
    }
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "https://review.example.org")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();

    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected, actual, body
    );
}

/// Base64 of a one-pixel PNG, as the browser would send it.
pub fn tiny_png_data_url() -> String {
    "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==".to_string()
}
