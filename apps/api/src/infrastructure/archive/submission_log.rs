use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const LOG_TARGET: &str = "submission_log";

/// Last-resort record of a submission whose notification could not be sent.
///
/// The full CSV and JSON always go to the `submission_log` tracing target.
/// When a directory is configured, both are also written to disk under a
/// time-ordered id so an operator can recover them.
#[derive(Debug, Clone, Default)]
pub struct SubmissionLog {
    directory: Option<PathBuf>,
}

/// Files written for one recorded submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedFiles {
    pub csv: PathBuf,
    pub json: PathBuf,
}

impl SubmissionLog {
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub async fn record(
        &self,
        reviewer_name: &str,
        csv: &str,
        backup_json: &str,
    ) -> anyhow::Result<Option<ArchivedFiles>> {
        tracing::info!(
            target: LOG_TARGET,
            reviewer = %reviewer_name,
            csv = %csv,
            backup = %backup_json,
            "submission recorded without notification"
        );

        let Some(directory) = &self.directory else {
            return Ok(None);
        };

        tokio::fs::create_dir_all(directory).await?;
        let stem = format!("submission-{}", Uuid::now_v7());
        let files = ArchivedFiles {
            csv: directory.join(format!("{stem}.csv")),
            json: directory.join(format!("{stem}.json")),
        };
        tokio::fs::write(&files.csv, csv).await?;
        tokio::fs::write(&files.json, backup_json).await?;

        tracing::info!(target: LOG_TARGET, path = %files.json.display(), "submission archived");
        Ok(Some(files))
    }
}
