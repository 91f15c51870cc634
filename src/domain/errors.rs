//! Domain error types
//!
//! This module defines the error hierarchy for logtrack.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main logtrack error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum LogbookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Export pipeline errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Validation errors (entry rules, required fields)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Log store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Export-specific errors
///
/// Every failure of the weekly export surfaces as one of these. None of them
/// are retried and no partial archive is produced.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Missing or malformed date handed to week-number computation
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// No records survived the exclusion filter
    #[error("No logs remaining after applying exclusions")]
    EmptyResult,

    /// Template resource could not be fetched
    #[error("Failed to fetch template from {url}: {message}")]
    TemplateFetch { url: String, message: String },

    /// Template could not be rendered with the supplied data
    #[error("Failed to render document: {0}")]
    Render(String),

    /// Rendered documents could not be packaged
    #[error("Failed to build archive: {0}")]
    Archive(String),
}

impl ExportError {
    /// Creates a template fetch error for the given URL
    pub fn template_fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TemplateFetch {
            url: url.into(),
            message: message.into(),
        }
    }
}

impl LogbookError {
    /// Exit code reported by the CLI for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            LogbookError::Configuration(_) | LogbookError::Validation(_) => 2,
            LogbookError::Export(ExportError::EmptyResult) => 1,
            LogbookError::Export(ExportError::TemplateFetch { .. }) => 4,
            _ => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for LogbookError {
    fn from(err: std::io::Error) -> Self {
        LogbookError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for LogbookError {
    fn from(err: serde_json::Error) -> Self {
        LogbookError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for LogbookError {
    fn from(err: toml::de::Error) -> Self {
        LogbookError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        ExportError::Archive(err.to_string())
    }
}
