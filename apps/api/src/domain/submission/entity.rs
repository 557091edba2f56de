use super::errors::SubmissionError;
use crate::domain::review::ResponseCollection;
use base64::{Engine, engine::general_purpose::STANDARD};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// A reference file attached by the reviewer, transport-encoded.
///
/// `data` holds either bare base64 or a `data:<mime>;base64,<payload>` URL,
/// which is what browsers produce with `FileReader.readAsDataURL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UploadedImage {
    pub name: String,
    #[serde(rename = "type", default)]
    pub mime_type: String,
    pub data: String,
}

/// Raw bytes of an attachment after transport decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub mime_type: String,
    pub bytes: Bytes,
}

impl UploadedImage {
    /// Encodes raw file bytes as a data URL.
    pub fn from_bytes(name: &str, mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            data: format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)),
        }
    }

    pub fn decode(&self) -> Result<DecodedImage, SubmissionError> {
        let invalid = |reason: &str| SubmissionError::UploadFailed {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        let (declared_mime, payload) = match self.data.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest
                    .split_once(',')
                    .ok_or_else(|| invalid("data URL has no payload"))?;
                let mime = header
                    .strip_suffix(";base64")
                    .ok_or_else(|| invalid("data URL is not base64 encoded"))?;
                (Some(mime), payload)
            }
            None => (None, self.data.as_str()),
        };

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| invalid(&format!("invalid base64: {}", e)))?;
        if bytes.is_empty() {
            return Err(invalid("attachment is empty"));
        }

        let mime_type = if self.mime_type.trim().is_empty() {
            declared_mime
                .filter(|mime| !mime.is_empty())
                .unwrap_or("application/octet-stream")
                .to_string()
        } else {
            self.mime_type.clone()
        };

        Ok(DecodedImage {
            mime_type,
            bytes: Bytes::from(bytes),
        })
    }
}

/// Per-attachment result of archiving to the image host.
#[derive(Debug)]
pub enum UploadOutcome {
    Hosted(String),
    Skipped(SubmissionError),
}

/// A validated submission, ready for the notification pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub reviewer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_email: Option<String>,
    pub responses: ResponseCollection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_feedback: Option<String>,
    pub uploaded_images: Vec<UploadedImage>,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Additional feedback, if it has any non-whitespace content.
    pub fn feedback(&self) -> Option<&str> {
        self.additional_feedback
            .as_deref()
            .filter(|feedback| !feedback.trim().is_empty())
    }

    pub fn reviewer_slug(&self) -> String {
        reviewer_slug(&self.reviewer_name)
    }
}

/// Used when a name has no letters or digits to keep.
pub const FALLBACK_SLUG: &str = "reviewer";

/// Lowercased reviewer name with whitespace runs replaced by `-`, used for
/// upload folders and attachment filenames. Path and quoting characters are
/// dropped.
pub fn reviewer_slug(name: &str) -> String {
    let slug: String = WHITESPACE_RUN
        .replace_all(name.trim(), "-")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect();
    if slug.chars().any(char::is_alphanumeric) {
        slug
    } else {
        FALLBACK_SLUG.to_string()
    }
}
