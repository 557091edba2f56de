use async_trait::async_trait;
use bytes::Bytes;

/// One attachment on its way to the image host.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
    /// Destination folder on the host, e.g. `art-review-submissions/jane-doe`.
    pub folder: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Stores the image and returns its public URL.
    async fn upload(&self, upload: ImageUpload) -> anyhow::Result<String>;
}
