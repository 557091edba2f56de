use crate::domain::{
    shared::timestamp::to_iso_string,
    submission::{Submission, SubmissionError},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lossless JSON copy of a submission, attached to the notification and
/// written to the operational log when the notification cannot be sent.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionBackup<'a> {
    #[serde(flatten)]
    submission: &'a Submission,
    uploaded_image_urls: &'a [String],
    processed_at: String,
}

pub fn render_backup(
    submission: &Submission,
    image_urls: &[String],
    processed_at: DateTime<Utc>,
) -> Result<String, SubmissionError> {
    let backup = SubmissionBackup {
        submission,
        uploaded_image_urls: image_urls,
        processed_at: to_iso_string(&processed_at),
    };
    Ok(serde_json::to_string_pretty(&backup)?)
}
