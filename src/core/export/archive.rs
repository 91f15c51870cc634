//! Archive packaging
//!
//! Rendered documents are collected into one in-memory zip, which is then
//! written to the output directory in a single step.

use crate::domain::{ExportError, LogbookError, Result};
use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// File name of the archive written to the output directory
pub const ARCHIVE_NAME: &str = "documents.zip";

/// Collects documents into a deflate-compressed zip
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: FileOptions,
    names: HashSet<String>,
}

impl ArchiveBuilder {
    /// Creates an empty archive
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: FileOptions::default().compression_method(CompressionMethod::Deflated),
            names: HashSet::new(),
        }
    }

    /// Adds one entry
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Archive`] for a duplicate name or a write failure.
    pub fn add(&mut self, name: &str, bytes: &[u8]) -> std::result::Result<(), ExportError> {
        if !self.names.insert(name.to_string()) {
            return Err(ExportError::Archive(format!("duplicate entry '{name}'")));
        }
        self.writer.start_file(name, self.options)?;
        self.writer
            .write_all(bytes)
            .map_err(|e| ExportError::Archive(format!("failed to write '{name}': {e}")))?;
        Ok(())
    }

    /// Number of entries added so far
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing was added
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Finishes the archive and returns its bytes
    pub fn finish(mut self) -> std::result::Result<Vec<u8>, ExportError> {
        Ok(self.writer.finish()?.into_inner())
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes archive bytes to `<dir>/documents.zip`, creating `dir` if needed
///
/// The bytes go to a temp file first, so a failed write never leaves a
/// truncated archive behind.
pub async fn write_archive(dir: &Path, bytes: &[u8]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        LogbookError::Io(format!(
            "Failed to create output directory {}: {e}",
            dir.display()
        ))
    })?;

    let target = dir.join(ARCHIVE_NAME);
    let tmp = dir.join(format!("{ARCHIVE_NAME}.tmp"));
    tokio::fs::write(&tmp, bytes)
        .await
        .map_err(|e| LogbookError::Io(format!("Failed to write {}: {e}", tmp.display())))?;
    tokio::fs::rename(&tmp, &target)
        .await
        .map_err(|e| LogbookError::Io(format!("Failed to write {}: {e}", target.display())))?;

    tracing::info!(path = %target.display(), bytes = bytes.len(), "Archive written");
    Ok(target)
}
