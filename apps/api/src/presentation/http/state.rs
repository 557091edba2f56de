use crate::{
    application::submit_review::{
        notification::NotificationRenderer,
        use_case::{PipelineSettings, SubmitReviewUseCase},
    },
    config::Config,
    infrastructure::{
        archive::submission_log::SubmissionLog,
        mail::{sendgrid_mailer::SendGridMailer, traits::EmailSender},
        storage::{cloudinary_image_host::CloudinaryImageHost, traits::ImageHost},
    },
};
use std::{sync::Arc, time::Duration};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub submit_review: Arc<SubmitReviewUseCase>,
}

impl AppState {
    /// Wires the production collaborators from configuration. Collaborators
    /// without credentials are left out.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()?;

        let image_host = config.cloudinary.as_ref().map(|cloudinary| {
            Arc::new(CloudinaryImageHost::new(
                client.clone(),
                cloudinary.cloud_name.clone(),
                cloudinary.api_key.clone(),
                cloudinary.api_secret.clone(),
                config.cloudinary_signature,
            )) as Arc<dyn ImageHost>
        });
        let mailer = config.sendgrid_api_key.as_ref().map(|api_key| {
            Arc::new(SendGridMailer::new(
                client.clone(),
                api_key.clone(),
                config.sendgrid_endpoint.clone(),
            )) as Arc<dyn EmailSender>
        });

        Self::with_collaborators(config, image_host, mailer)
    }

    pub fn with_collaborators(
        config: Config,
        image_host: Option<Arc<dyn ImageHost>>,
        mailer: Option<Arc<dyn EmailSender>>,
    ) -> anyhow::Result<Self> {
        let settings = PipelineSettings {
            upload_folder: config.upload_folder.clone(),
            upload_concurrency: config.upload_concurrency,
            sender_email: config.sender_email.clone(),
            sender_name: config.sender_name.clone(),
            recipient: config.notification_email.clone(),
        };
        let submit_review = SubmitReviewUseCase::new(
            image_host,
            mailer,
            Arc::new(SubmissionLog::new(config.submission_log_dir.clone())),
            NotificationRenderer::new()?,
            settings,
        );

        Ok(Self {
            config,
            submit_review: Arc::new(submit_review),
        })
    }
}
