use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmissionError {
    /// A required payload field is absent or blank. Terminal, client-caused.
    #[error("Missing required fields")]
    MissingField(&'static str),
    /// A payload field is present but malformed. Terminal, client-caused.
    #[error("Invalid field: {0}")]
    InvalidField(String),
    /// One attachment could not be archived. Logged and skipped.
    #[error("Upload failed for {name}: {reason}")]
    UploadFailed { name: String, reason: String },
    /// The notification e-mail could not be sent. Falls back to the
    /// operational log; the submission still succeeds.
    #[error("Notification dispatch failed: {0}")]
    NotificationDispatchFailed(String),
    /// Anything else that went wrong while processing. Terminal.
    #[error("Unexpected failure: {0}")]
    UnexpectedFailure(String),
}

impl From<csv::Error> for SubmissionError {
    fn from(err: csv::Error) -> Self {
        Self::UnexpectedFailure(format!("CSV rendering failed: {}", err))
    }
}

impl From<serde_json::Error> for SubmissionError {
    fn from(err: serde_json::Error) -> Self {
        Self::UnexpectedFailure(format!("JSON rendering failed: {}", err))
    }
}

impl From<tera::Error> for SubmissionError {
    fn from(err: tera::Error) -> Self {
        Self::UnexpectedFailure(format!("Notification rendering failed: {}", err))
    }
}
