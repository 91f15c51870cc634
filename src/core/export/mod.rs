//! Weekly export orchestration
//!
//! This module provides the export pipeline for logtrack, including:
//! - Export coordination (store, partition, render, package)
//! - Archive packaging
//! - Summary and reporting

pub mod archive;
pub mod coordinator;
pub mod summary;

pub use archive::{write_archive, ArchiveBuilder, ARCHIVE_NAME};
pub use coordinator::{build_archive, ExportCoordinator, ExportRequest};
pub use summary::ExportSummary;
