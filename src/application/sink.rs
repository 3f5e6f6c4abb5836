use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::domain::{AppError, Payload};

/// Destination for a finished download. The payload is moved in and
/// dropped once written.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    async fn save(&self, payload: Payload) -> Result<PathBuf, AppError>;
}

/// Saves into a fixed directory, like a browser download folder.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn save(&self, payload: Payload) -> Result<PathBuf, AppError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::Io(format!("Failed to create {}: {}", self.dir.display(), e))
        })?;

        let path = self.dir.join(&payload.file_name);
        write_payload(&path, &payload).await?;
        Ok(path)
    }
}

/// Lets the user pick the location, pre-filled with the suggested name.
#[derive(Debug, Clone, Default)]
pub struct DialogSink;

#[async_trait]
impl DownloadSink for DialogSink {
    async fn save(&self, payload: Payload) -> Result<PathBuf, AppError> {
        let path = rfd::AsyncFileDialog::new()
            .set_file_name(&payload.file_name)
            .save_file()
            .await
            .map(|handle| handle.path().to_path_buf())
            .ok_or(AppError::Cancelled)?;

        write_payload(&path, &payload).await?;
        Ok(path)
    }
}

async fn write_payload(path: &Path, payload: &Payload) -> Result<(), AppError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| AppError::Io(format!("Failed to create file: {}", e)))?;

    file.write_all(&payload.bytes)
        .await
        .map_err(|e| AppError::Io(format!("Write error: {}", e)))?;

    file.sync_all()
        .await
        .map_err(|e| AppError::Io(format!("Failed to sync file: {}", e)))?;

    tracing::info!(path = %path.display(), bytes = payload.bytes.len(), "payload saved");
    Ok(())
}
