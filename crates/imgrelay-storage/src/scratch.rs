use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{StorageError, StorageResult};

/// Scratch directory shared by all requests
///
/// Requests never coordinate: each one writes under its own unique name.
#[derive(Clone, Debug)]
pub struct ScratchStorage {
    dir: PathBuf,
}

impl ScratchStorage {
    /// Create a handle on the scratch directory.
    ///
    /// The directory is not touched here; it is (re)created on each write so
    /// that removing it at runtime does not wedge the service.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the scratch directory (and parents) if missing.
    pub async fn ensure_dir(&self) -> StorageResult<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o755);

        builder
            .create(&self.dir)
            .await
            .map_err(|source| StorageError::DirectoryUnavailable {
                path: self.dir.clone(),
                source,
            })
    }

    /// Write `data` to `<dir>/<base_name>` and return the guard owning it.
    ///
    /// `base_name` must be a single, server-generated path component. An
    /// existing file is never overwritten. If the write fails part way, the
    /// partial file is removed before the error is returned.
    pub async fn write(&self, base_name: &str, data: &[u8]) -> StorageResult<ScratchFile> {
        validate_base_name(base_name)?;
        self.ensure_dir().await?;

        let path = self.dir.join(base_name);
        let start = std::time::Instant::now();

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|source| StorageError::WriteFailed {
                path: path.clone(),
                source,
            })?;

        // From here on the file exists, so the guard owns it even on failure.
        let scratch = ScratchFile::new(path.clone(), base_name.to_string());

        let written = async {
            file.write_all(data).await?;
            file.sync_all().await
        }
        .await;

        if let Err(source) = written {
            drop(file);
            scratch.release().await;
            return Err(StorageError::WriteFailed { path, source });
        }

        tracing::debug!(
            path = %path.display(),
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Scratch file written"
        );

        Ok(scratch)
    }
}

fn validate_base_name(base_name: &str) -> StorageResult<()> {
    if base_name.is_empty()
        || base_name == "."
        || base_name.contains("..")
        || base_name.contains('/')
        || base_name.contains('\\')
    {
        return Err(StorageError::InvalidName(base_name.to_string()));
    }
    Ok(())
}

/// A file in the scratch directory, deleted exactly once
///
/// Call [`ScratchFile::release`] on every exit path. If the guard is dropped
/// without being released (e.g. the owning task panicked), `Drop` makes the
/// single deletion attempt synchronously instead.
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
    base_name: String,
    released: bool,
}

impl ScratchFile {
    fn new(path: PathBuf, base_name: String) -> Self {
        Self {
            path,
            base_name,
            released: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name within the scratch directory, e.g. `<token>_img`
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Read the scratch file back.
    pub async fn read(&self) -> StorageResult<Vec<u8>> {
        fs::read(&self.path)
            .await
            .map_err(|source| StorageError::ReadFailed {
                path: self.path.clone(),
                source,
            })
    }

    /// Delete the scratch file. Failures are logged, never returned.
    pub async fn release(mut self) {
        self.released = true;
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Scratch file removed");
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "Scratch file already gone");
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Failed to remove scratch file"
                );
            }
        }
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Scratch file removed on drop without explicit release"
                );
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Failed to remove scratch file on drop"
                );
            }
        }
    }
}
