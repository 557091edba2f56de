use crate::domain::{
    review::ArtworkResponse,
    submission::{Submission, SubmissionError, UploadedImage},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;
use validator::Validate;

/// Body of `POST /api/v1/reviews` as sent by the review form.
///
/// Every field is optional at the serde level so that missing required
/// fields surface as a validation error instead of a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SubmitReviewRequest {
    #[serde(default)]
    pub reviewer_name: Option<String>,
    #[serde(default)]
    #[validate(email)]
    pub reviewer_email: Option<String>,
    #[serde(default)]
    pub responses: Option<BTreeMap<String, ArtworkResponse>>,
    #[serde(default)]
    pub additional_feedback: Option<String>,
    #[serde(default)]
    pub uploaded_images: Vec<UploadedImage>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl TryFrom<SubmitReviewRequest> for Submission {
    type Error = SubmissionError;

    fn try_from(mut request: SubmitReviewRequest) -> Result<Self, Self::Error> {
        let reviewer_name = request
            .reviewer_name
            .take()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(SubmissionError::MissingField("reviewerName"))?;
        let responses = request
            .responses
            .take()
            .ok_or(SubmissionError::MissingField("responses"))?;

        request.reviewer_email = request
            .reviewer_email
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty());
        request
            .validate()
            .map_err(|_| SubmissionError::InvalidField("reviewerEmail".into()))?;

        Ok(Submission {
            reviewer_name,
            reviewer_email: request.reviewer_email,
            responses: responses.into(),
            additional_feedback: request.additional_feedback,
            uploaded_images: request.uploaded_images,
            submitted_at: request.submitted_at.unwrap_or_else(Utc::now),
        })
    }
}

/// Body returned on a successful submission.
///
/// `uploadedImages` is the count of archived attachments; `imageUrls` lists
/// them in submission order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SubmitReviewResponse {
    pub success: bool,
    pub message: String,
    pub uploaded_images: usize,
    pub image_urls: Vec<String>,
}
