//! Application configuration loading from environment variables.
//!
//! Configuration is read once at startup, validated, and handed to the
//! submission pipeline. Nothing reads the environment while serving a request.
//!
//! # Environment Variables
//!
//! ## Server
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 3000)
//! - `MAX_BODY_BYTES`: Largest accepted request body (default: 20 MiB)
//! - `HTTP_TIMEOUT_SECONDS`: Timeout for calls to the image host and mail API (default: 30)
//!
//! ## Pipeline
//! - `UPLOAD_CONCURRENCY`: Attachments uploaded at once (default: 4)
//! - `NOTIFICATION_EMAIL`: Recipient of every submission notification
//! - `SENDER_EMAIL`: From address (default: "noreply@example.com")
//! - `SENDER_NAME`: From name (default: "Art Review")
//! - `SUBMISSION_LOG_DIR`: Directory for submissions that could not be mailed
//!
//! ## Collaborators (optional)
//! - `SENDGRID_API_KEY`, `SENDGRID_ENDPOINT`
//! - `CLOUDINARY_CLOUD_NAME`, `CLOUDINARY_API_KEY`, `CLOUDINARY_API_SECRET`
//! - `CLOUDINARY_FOLDER`: Upload folder prefix (default: "art-review-submissions")
//! - `CLOUDINARY_SIGNATURE_ALGORITHM`: "sha1" or "sha256" (default: "sha1")
//!
//! Without SendGrid credentials every submission is written to the submission
//! log. Without Cloudinary credentials attachments are skipped.

use crate::infrastructure::storage::cloudinary_image_host::SignatureAlgorithm;
use std::path::PathBuf;

/// Cloudinary account credentials. Either all three are set or none.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_body_bytes: usize,
    pub http_timeout_seconds: u64,

    pub upload_concurrency: usize,
    pub upload_folder: String,

    /// Single fixed recipient of submission notifications.
    pub notification_email: Option<String>,
    pub sender_email: String,
    pub sender_name: String,

    pub sendgrid_api_key: Option<String>,
    /// Overrides the SendGrid v3 send endpoint, mostly for local relays.
    pub sendgrid_endpoint: Option<String>,

    pub cloudinary: Option<CloudinaryConfig>,
    pub cloudinary_signature: SignatureAlgorithm,

    pub submission_log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_body_bytes: 20 * 1024 * 1024,
            http_timeout_seconds: 30,
            upload_concurrency: 4,
            upload_folder: "art-review-submissions".to_string(),
            notification_email: None,
            sender_email: "noreply@example.com".to_string(),
            sender_name: "Art Review".to_string(),
            sendgrid_api_key: None,
            sendgrid_endpoint: None,
            cloudinary: None,
            cloudinary_signature: SignatureAlgorithm::default(),
            submission_log_dir: None,
        }
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the combination of
    /// variables is inconsistent (see [`Config::validate`]).
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let cloudinary = cloudinary_from_parts(
            env_optional("CLOUDINARY_CLOUD_NAME"),
            env_optional("CLOUDINARY_API_KEY"),
            env_optional("CLOUDINARY_API_SECRET"),
        )?;

        let config = Self {
            host: env_or("HOST", defaults.host)?,
            port: env_or("PORT", defaults.port)?,
            max_body_bytes: env_or("MAX_BODY_BYTES", defaults.max_body_bytes)?,
            http_timeout_seconds: env_or("HTTP_TIMEOUT_SECONDS", defaults.http_timeout_seconds)?,
            upload_concurrency: env_or("UPLOAD_CONCURRENCY", defaults.upload_concurrency)?,
            upload_folder: env_or("CLOUDINARY_FOLDER", defaults.upload_folder)?,
            notification_email: env_optional("NOTIFICATION_EMAIL"),
            sender_email: env_or("SENDER_EMAIL", defaults.sender_email)?,
            sender_name: env_or("SENDER_NAME", defaults.sender_name)?,
            sendgrid_api_key: env_optional("SENDGRID_API_KEY"),
            sendgrid_endpoint: env_optional("SENDGRID_ENDPOINT"),
            cloudinary,
            cloudinary_signature: env_or(
                "CLOUDINARY_SIGNATURE_ALGORITHM",
                defaults.cloudinary_signature,
            )?,
            submission_log_dir: env_optional("SUBMISSION_LOG_DIR").map(PathBuf::from),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects combinations that would silently lose submissions or never
    /// upload anything.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.upload_concurrency == 0 {
            anyhow::bail!("UPLOAD_CONCURRENCY must be at least 1");
        }
        if self.sendgrid_api_key.is_some() && self.notification_email.is_none() {
            anyhow::bail!("SENDGRID_API_KEY is set but NOTIFICATION_EMAIL is missing");
        }
        if self.max_body_bytes == 0 {
            anyhow::bail!("MAX_BODY_BYTES must be positive");
        }
        Ok(())
    }

    pub fn mail_configured(&self) -> bool {
        self.sendgrid_api_key.is_some() && self.notification_email.is_some()
    }
}

/// Cloudinary credentials only count when complete; a partial set is a
/// deployment mistake.
fn cloudinary_from_parts(
    cloud_name: Option<String>,
    api_key: Option<String>,
    api_secret: Option<String>,
) -> anyhow::Result<Option<CloudinaryConfig>> {
    match (cloud_name, api_key, api_secret) {
        (Some(cloud_name), Some(api_key), Some(api_secret)) => Ok(Some(CloudinaryConfig {
            cloud_name,
            api_key,
            api_secret,
        })),
        (None, None, None) => Ok(None),
        _ => anyhow::bail!(
            "CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET must be set together"
        ),
    }
}

/// Load an optional environment variable; blank values count as unset.
fn env_optional(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

/// Load an environment variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env_optional(key) {
        Some(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        None => Ok(default),
    }
}
