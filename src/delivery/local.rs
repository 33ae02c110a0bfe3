//! Report written to the local filesystem

use crate::core::error::DeliveryError;
use std::path::{Component, Path, PathBuf};

/// Writes reports into one directory, creating it on demand
#[derive(Debug, Clone)]
pub struct LocalReportWriter {
    directory: PathBuf,
}

impl LocalReportWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Write `bytes` as `filename` and return the absolute path
    ///
    /// `filename` must be a bare file name; anything that would leave the
    /// reports directory is refused.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, DeliveryError> {
        if !is_plain_file_name(filename) {
            return Err(DeliveryError::Io {
                path: filename.to_string(),
                message: "report file name must not contain a path".to_string(),
            });
        }

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| io_error(&self.directory, e))?;

        let path = self.directory.join(filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| io_error(&path, e))?;

        let absolute = tokio::fs::canonicalize(&path)
            .await
            .map_err(|e| io_error(&path, e))?;

        tracing::info!(path = %absolute.display(), bytes = bytes.len(), "Report saved");
        Ok(absolute)
    }
}

fn is_plain_file_name(filename: &str) -> bool {
    let mut components = Path::new(filename).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn io_error(path: &Path, err: std::io::Error) -> DeliveryError {
    DeliveryError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}
