use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::SinkError;

use super::{check_file_name, Download, DownloadSink};

/// Saves downloads as files in a local directory.
///
/// Each file is written to a hidden temporary name first and renamed into
/// place once complete.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Create a sink writing into `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Final path for a download name.
    pub fn path_for(&self, file_name: &str) -> Result<PathBuf, SinkError> {
        check_file_name(file_name)?;
        Ok(self.root.join(file_name))
    }

    fn io_error(path: &Path, err: std::io::Error) -> SinkError {
        SinkError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn save(&self, download: &Download) -> Result<(), SinkError> {
        let target = self.path_for(&download.file_name)?;
        let partial = self.root.join(format!(".{}.part", download.file_name));

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Self::io_error(&self.root, e))?;

        if let Err(e) = tokio::fs::write(&partial, &download.data).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(Self::io_error(&partial, e));
        }

        if let Err(e) = tokio::fs::rename(&partial, &target).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(Self::io_error(&target, e));
        }

        debug!("Saved {} ({} bytes)", target.display(), download.len());
        Ok(())
    }
}
