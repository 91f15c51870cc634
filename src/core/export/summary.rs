//! Export summary and reporting
//!
//! This module defines the structure reporting the outcome of one export.

use std::path::PathBuf;
use std::time::Duration;

/// Summary of an export operation
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Template key used
    pub template: String,

    /// Records loaded from the store
    pub records_considered: usize,

    /// Records dropped by the exclusion filter
    pub records_excluded: usize,

    /// Week numbers that produced a document, ascending
    pub weeks: Vec<i64>,

    /// Archive entry names, in week order
    pub documents: Vec<String>,

    /// Where the archive was written (None for dry runs)
    pub archive_path: Option<PathBuf>,

    /// Archive size in bytes
    pub archive_bytes: usize,

    /// True if nothing was fetched or written
    pub dry_run: bool,

    /// Duration of the export
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            records_considered: 0,
            records_excluded: 0,
            weeks: Vec::new(),
            documents: Vec::new(),
            archive_path: None,
            archive_bytes: 0,
            dry_run: false,
            duration: Duration::from_secs(0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Records that made it into a document
    pub fn records_included(&self) -> usize {
        self.records_considered - self.records_excluded
    }

    /// Number of documents produced (or planned, for a dry run)
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            template = %self.template,
            considered = self.records_considered,
            excluded = self.records_excluded,
            included = self.records_included(),
            documents = self.document_count(),
            archive_bytes = self.archive_bytes,
            dry_run = self.dry_run,
            duration_ms = self.duration.as_millis() as u64,
            "Export summary"
        );

        if let Some(path) = &self.archive_path {
            tracing::info!(path = %path.display(), "Archive location");
        }
    }
}
