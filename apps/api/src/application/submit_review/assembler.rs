use super::dto::SubmitReviewRequest;
use crate::domain::{
    review::ResponseCollection,
    submission::UploadedImage,
};
use chrono::{DateTime, Utc};

/// Collects a reviewer's session state into one request payload.
///
/// Attachments are queued as raw bytes and encoded as data URLs;
/// `submittedAt` is stamped when the payload is built.
#[derive(Debug, Default)]
pub struct SubmissionAssembler {
    reviewer_name: String,
    reviewer_email: Option<String>,
    responses: ResponseCollection,
    additional_feedback: String,
    attachments: Vec<UploadedImage>,
}

impl SubmissionAssembler {
    pub fn new(reviewer_name: impl Into<String>) -> Self {
        Self {
            reviewer_name: reviewer_name.into(),
            ..Default::default()
        }
    }

    pub fn reviewer_email(mut self, email: impl Into<String>) -> Self {
        self.reviewer_email = Some(email.into());
        self
    }

    pub fn responses(mut self, responses: ResponseCollection) -> Self {
        self.responses = responses;
        self
    }

    pub fn feedback(mut self, feedback: impl Into<String>) -> Self {
        self.additional_feedback = feedback.into();
        self
    }

    pub fn attach(mut self, name: &str, mime_type: &str, bytes: &[u8]) -> Self {
        self.attachments
            .push(UploadedImage::from_bytes(name, mime_type, bytes));
        self
    }

    pub fn build(self) -> SubmitReviewRequest {
        self.build_at(Utc::now())
    }

    pub fn build_at(self, submitted_at: DateTime<Utc>) -> SubmitReviewRequest {
        SubmitReviewRequest {
            reviewer_name: Some(self.reviewer_name),
            reviewer_email: self.reviewer_email,
            responses: Some(self.responses.into_entries()),
            additional_feedback: Some(self.additional_feedback),
            uploaded_images: self.attachments,
            submitted_at: Some(submitted_at),
        }
    }
}
