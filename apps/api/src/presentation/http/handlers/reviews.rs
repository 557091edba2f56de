use crate::{
    application::submit_review::dto::{SubmitReviewRequest, SubmitReviewResponse},
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{Json, extract::State, extract::rejection::JsonRejection};

pub async fn submit_review(
    State(state): State<AppState>,
    payload: Result<Json<SubmitReviewRequest>, JsonRejection>,
) -> Result<Json<SubmitReviewResponse>, AppError> {
    let Json(request) = payload?;
    let receipt = state.submit_review.execute(request).await?;

    Ok(Json(SubmitReviewResponse {
        success: true,
        message: receipt.message,
        uploaded_images: receipt.uploaded_count,
        image_urls: receipt.image_urls,
    }))
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
