use crate::domain::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

fn io_err(msg: impl Into<String>) -> AppError {
    AppError::IoError(msg.into())
}

fn invalid_input(msg: impl Into<String>) -> AppError {
    AppError::ValidationError(msg.into())
}

/// Where a delivered export ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReceipt {
    pub filename: String,
    pub path: String,
    pub bytes: usize,
}

/// Terminal, side-effecting step of an export: hand the bytes to the user.
pub trait DownloadSink {
    fn deliver(&self, bytes: &[u8], filename: &str) -> Result<ExportReceipt>;
}

/// Saves exports into a directory.
///
/// Bytes are staged in a temporary file next to the target and renamed into
/// place. The staged file is removed on every path that does not end in a
/// successful rename.
#[derive(Debug, Clone)]
pub struct FileDownload {
    dir: PathBuf,
}

impl FileDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for FileDownload {
    fn deliver(&self, bytes: &[u8], filename: &str) -> Result<ExportReceipt> {
        validate_filename(filename)?;
        ensure_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut staged = StagedFile::create(&target)?;
        staged.write_all(bytes)?;
        staged.persist()?;

        info!(path = %target.display(), bytes = bytes.len(), "Export saved");

        Ok(ExportReceipt {
            filename: filename.to_string(),
            path: target.display().to_string(),
            bytes: bytes.len(),
        })
    }
}

fn validate_filename(filename: &str) -> Result<()> {
    if filename.trim().is_empty() {
        return Err(invalid_input("Export filename is empty"));
    }
    if filename.contains(['/', '\\']) || filename == "." || filename == ".." {
        return Err(invalid_input(format!(
            "Export filename must not contain a path: {}",
            filename
        )));
    }
    Ok(())
}

fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|e| io_err(format!("Failed to create dir {}: {e}", path.display())))?;
    Ok(())
}

/// Temporary file that is deleted on drop unless persisted.
struct StagedFile {
    tmp_path: PathBuf,
    target: PathBuf,
    file: Option<fs::File>,
    persisted: bool,
}

impl StagedFile {
    fn create(target: &Path) -> Result<Self> {
        let tmp_path = target.with_extension(format!("tmp-{}", Uuid::new_v4()));
        let file = fs::File::create(&tmp_path).map_err(|e| {
            io_err(format!(
                "Failed to create temp file {}: {e}",
                tmp_path.display()
            ))
        })?;
        debug!(path = %tmp_path.display(), "Staged export file");
        Ok(Self {
            tmp_path,
            target: target.to_path_buf(),
            file: Some(file),
            persisted: false,
        })
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| io_err("Staged file already closed"))?;
        file.write_all(bytes).map_err(|e| {
            io_err(format!(
                "Failed to write temp file {}: {e}",
                self.tmp_path.display()
            ))
        })?;
        file.sync_all().ok();
        Ok(())
    }

    fn persist(mut self) -> Result<()> {
        // Close the handle before renaming.
        self.file.take();

        let backup = self.move_existing_aside()?;

        if let Err(e) = fs::rename(&self.tmp_path, &self.target) {
            if let Some(backup) = &backup {
                let _ = fs::rename(backup, &self.target);
            }
            return Err(io_err(format!(
                "Failed to rename temp file {} to {}: {e}",
                self.tmp_path.display(),
                self.target.display()
            )));
        }
        self.persisted = true;

        if let Some(backup) = backup {
            let _ = fs::remove_file(&backup);
        }
        Ok(())
    }

    // Rename replaces the target atomically on Unix; nothing to move.
    #[cfg(not(windows))]
    fn move_existing_aside(&self) -> Result<Option<PathBuf>> {
        Ok(None)
    }

    // Rename cannot replace on Windows; move the old file away first.
    #[cfg(windows)]
    fn move_existing_aside(&self) -> Result<Option<PathBuf>> {
        let backup = self
            .target
            .with_extension(format!("bak-{}", Uuid::new_v4()));
        match fs::rename(&self.target, &backup) {
            Ok(()) => Ok(Some(backup)),
            // Gone already, possibly replaced by a concurrent export.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_err(format!(
                "Failed to move existing file {} to {}: {e}",
                self.target.display(),
                backup.display()
            ))),
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        self.file.take();
        if !self.persisted {
            if let Err(e) = fs::remove_file(&self.tmp_path) {
                warn!(path = %self.tmp_path.display(), "Failed to remove staged export: {}", e);
            }
        }
    }
}
