//! Template retrieval
//!
//! Templates are addressed by URL. `http(s)://` locations are downloaded,
//! `file://` locations and bare paths are read from disk. Failures surface as
//! [`ExportError::TemplateFetch`] and are never retried.

pub mod file;
pub mod http;

pub use file::FileTemplateSource;
pub use http::HttpTemplateSource;

use crate::domain::ExportError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Something that can produce template bytes for a location
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Fetches the raw template bytes
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::TemplateFetch`] if the template cannot be retrieved.
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, ExportError>;
}

/// Where a template location points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateLocation {
    /// Remote resource
    Remote(Url),
    /// File on the local filesystem
    Local(PathBuf),
}

impl TemplateLocation {
    /// Classifies a location string
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::TemplateFetch`] for unsupported URL schemes.
    pub fn parse(location: &str) -> Result<Self, ExportError> {
        let trimmed = location.trim();
        match Url::parse(trimmed) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Self::Remote(url)),
                "file" => url.to_file_path().map(Self::Local).map_err(|_| {
                    ExportError::template_fetch(trimmed, "file URL has no usable path")
                }),
                // single-letter schemes are Windows drive letters
                scheme if scheme.len() == 1 => Ok(Self::Local(PathBuf::from(trimmed))),
                scheme => Err(ExportError::template_fetch(
                    trimmed,
                    format!("unsupported URL scheme '{scheme}'"),
                )),
            },
            Err(_) => Ok(Self::Local(PathBuf::from(trimmed))),
        }
    }
}

/// Dispatches to the HTTP or file source depending on the location
pub struct RoutingTemplateSource {
    http: HttpTemplateSource,
    file: FileTemplateSource,
}

impl RoutingTemplateSource {
    /// Creates a router whose HTTP downloads use `timeout`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, ExportError> {
        Ok(Self {
            http: HttpTemplateSource::new(timeout)?,
            file: FileTemplateSource,
        })
    }
}

#[async_trait]
impl TemplateSource for RoutingTemplateSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, ExportError> {
        match TemplateLocation::parse(location)? {
            TemplateLocation::Remote(_) => self.http.fetch(location).await,
            TemplateLocation::Local(_) => self.file.fetch(location).await,
        }
    }
}

/// Create the default template source
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn create_template_source(timeout_seconds: u64) -> Result<Arc<dyn TemplateSource>, ExportError> {
    Ok(Arc::new(RoutingTemplateSource::new(Duration::from_secs(
        timeout_seconds,
    ))?))
}
