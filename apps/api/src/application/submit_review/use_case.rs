use super::{
    backup::render_backup, csv_report::render_csv, dto::SubmitReviewRequest,
    notification::NotificationRenderer,
};
use crate::{
    domain::submission::{Submission, SubmissionError, UploadOutcome, UploadedImage},
    infrastructure::{
        archive::submission_log::SubmissionLog,
        mail::traits::{EmailAttachment, EmailMessage, EmailSender},
        storage::traits::{ImageHost, ImageUpload},
    },
};
use chrono::{DateTime, Utc};
use futures_util::{StreamExt, stream};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub const SUCCESS_MESSAGE: &str = "Review submitted successfully";

/// Settings the pipeline needs from configuration, fixed at startup.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Prefix of the per-reviewer upload folder.
    pub upload_folder: String,
    pub upload_concurrency: usize,
    pub sender_email: String,
    pub sender_name: String,
    /// Where notifications go. Without one, every submission falls back to
    /// the submission log.
    pub recipient: Option<String>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            upload_folder: "art-review-submissions".to_string(),
            upload_concurrency: 4,
            sender_email: "noreply@example.com".to_string(),
            sender_name: "Art Review".to_string(),
            recipient: None,
        }
    }
}

/// How the notification for a submission ended up being delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    Logged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub message: String,
    pub uploaded_count: usize,
    pub image_urls: Vec<String>,
    pub delivery: Delivery,
}

/// Turns a reviewer's payload into a notification with CSV and JSON
/// attachments.
///
/// Only validation and rendering failures fail the request. Attachments that
/// cannot be archived are skipped, and a notification that cannot be sent is
/// written to the [`SubmissionLog`] instead.
pub struct SubmitReviewUseCase {
    image_host: Option<Arc<dyn ImageHost>>,
    mailer: Option<Arc<dyn EmailSender>>,
    submission_log: Arc<SubmissionLog>,
    renderer: NotificationRenderer,
    settings: PipelineSettings,
}

impl SubmitReviewUseCase {
    pub fn new(
        image_host: Option<Arc<dyn ImageHost>>,
        mailer: Option<Arc<dyn EmailSender>>,
        submission_log: Arc<SubmissionLog>,
        renderer: NotificationRenderer,
        settings: PipelineSettings,
    ) -> Self {
        info!(
            image_host = image_host.is_some(),
            mailer = mailer.is_some(),
            recipient = settings.recipient.is_some(),
            archive_dir = ?submission_log.directory(),
            "Initializing SubmitReviewUseCase"
        );
        Self {
            image_host,
            mailer,
            submission_log,
            renderer,
            settings,
        }
    }

    pub fn image_host_configured(&self) -> bool {
        self.image_host.is_some()
    }

    pub fn mailer_configured(&self) -> bool {
        self.mailer.is_some() && self.settings.recipient.is_some()
    }

    pub async fn execute(
        &self,
        request: SubmitReviewRequest,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        self.execute_at(request, Utc::now()).await
    }

    /// Runs the pipeline with an explicit processing time, which stamps the
    /// backup, the notification footer and the attachment filenames.
    #[instrument(skip(self, request), fields(images = request.uploaded_images.len()))]
    pub async fn execute_at(
        &self,
        request: SubmitReviewRequest,
        received_at: DateTime<Utc>,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let submission = Submission::try_from(request).inspect_err(|err| {
            warn!(error = %err, "rejected submission");
        })?;

        let tally = submission.responses.tally();
        info!(
            reviewer = %submission.reviewer_name,
            responses = submission.responses.len(),
            rated = tally.rated(),
            "processing submission"
        );

        let image_urls = self.archive_images(&submission).await;

        let csv = render_csv(&submission, &image_urls)?;
        let backup = render_backup(&submission, &image_urls, received_at)?;
        let html = self.renderer.render(&submission, &image_urls, received_at)?;

        let delivery = self
            .dispatch(&submission, html, &csv, &backup, received_at)
            .await;

        info!(
            uploaded = image_urls.len(),
            delivery = ?delivery,
            "submission processed"
        );
        Ok(SubmissionReceipt {
            message: SUCCESS_MESSAGE.to_string(),
            uploaded_count: image_urls.len(),
            image_urls,
            delivery,
        })
    }

    /// Uploads every attachment with bounded concurrency. The returned URLs
    /// keep submission order; failed attachments are left out.
    async fn archive_images(&self, submission: &Submission) -> Vec<String> {
        let images = &submission.uploaded_images;
        if images.is_empty() {
            return Vec::new();
        }
        let Some(host) = self.image_host.as_deref() else {
            warn!(
                count = images.len(),
                "image host not configured, skipping attachments"
            );
            return Vec::new();
        };

        let folder = format!(
            "{}/{}",
            self.settings.upload_folder,
            submission.reviewer_slug()
        );
        let folder = folder.as_str();

        let pending: Vec<_> = images
            .iter()
            .enumerate()
            .map(|(index, image)| async move { (index, upload_one(host, image, folder).await) })
            .collect();
        let outcomes: Vec<(usize, UploadOutcome)> = stream::iter(pending)
            .buffer_unordered(self.settings.upload_concurrency.max(1))
            .collect()
            .await;

        let mut slots: Vec<Option<String>> = vec![None; images.len()];
        for (index, outcome) in outcomes {
            match outcome {
                UploadOutcome::Hosted(url) => {
                    debug!(index, url = %url, "attachment archived");
                    slots[index] = Some(url);
                }
                UploadOutcome::Skipped(err) => {
                    warn!(index, error = %err, "attachment skipped");
                }
            }
        }
        slots.into_iter().flatten().collect()
    }

    async fn dispatch(
        &self,
        submission: &Submission,
        html: String,
        csv: &str,
        backup: &str,
        received_at: DateTime<Utc>,
    ) -> Delivery {
        let result = match (&self.mailer, &self.settings.recipient) {
            (Some(mailer), Some(recipient)) => {
                let message = self.compose(submission, recipient, html, csv, backup, received_at);
                mailer
                    .send(&message)
                    .await
                    .map_err(|e| SubmissionError::NotificationDispatchFailed(e.to_string()))
            }
            _ => Err(SubmissionError::NotificationDispatchFailed(
                "mailer not configured".to_string(),
            )),
        };

        match result {
            Ok(()) => {
                info!("notification sent");
                Delivery::Sent
            }
            Err(err) => {
                warn!(error = %err, "falling back to submission log");
                if let Err(e) = self
                    .submission_log
                    .record(&submission.reviewer_name, csv, backup)
                    .await
                {
                    error!(error = %e, "failed to archive submission on disk");
                }
                Delivery::Logged
            }
        }
    }

    fn compose(
        &self,
        submission: &Submission,
        recipient: &str,
        html: String,
        csv: &str,
        backup: &str,
        received_at: DateTime<Utc>,
    ) -> EmailMessage {
        let basename = attachment_basename(submission, received_at);
        EmailMessage {
            to: recipient.to_string(),
            from_email: self.settings.sender_email.clone(),
            from_name: self.settings.sender_name.clone(),
            reply_to: submission.reviewer_email.clone(),
            subject: format!("Art Review Submission from {}", submission.reviewer_name),
            html,
            attachments: vec![
                EmailAttachment::new(format!("{basename}.csv"), "text/csv", csv),
                EmailAttachment::new(format!("{basename}.json"), "application/json", backup),
            ],
        }
    }
}

async fn upload_one(host: &dyn ImageHost, image: &UploadedImage, folder: &str) -> UploadOutcome {
    let decoded = match image.decode() {
        Ok(decoded) => decoded,
        Err(err) => return UploadOutcome::Skipped(err),
    };

    let upload = ImageUpload {
        file_name: image.name.clone(),
        content_type: decoded.mime_type,
        data: decoded.bytes,
        folder: folder.to_string(),
    };
    match host.upload(upload).await {
        Ok(url) => UploadOutcome::Hosted(url),
        Err(err) => UploadOutcome::Skipped(SubmissionError::UploadFailed {
            name: image.name.clone(),
            reason: err.to_string(),
        }),
    }
}

/// `art-review-<slug>-<YYYY-MM-DD>`, shared by both attachments.
pub fn attachment_basename(submission: &Submission, on: DateTime<Utc>) -> String {
    format!(
        "art-review-{}-{}",
        submission.reviewer_slug(),
        on.format("%Y-%m-%d")
    )
}
