use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    image_host: &'static str,
    mailer: &'static str,
}

fn configured(flag: bool) -> &'static str {
    if flag { "configured" } else { "disabled" }
}

/// Liveness plus which collaborators are wired. A missing collaborator
/// degrades the pipeline but never makes the service unhealthy.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        image_host: configured(state.submit_review.image_host_configured()),
        mailer: configured(state.submit_review.mailer_configured()),
    })
}
