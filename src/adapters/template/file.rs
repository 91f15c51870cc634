//! Local template files

use super::{TemplateLocation, TemplateSource};
use crate::domain::ExportError;
use async_trait::async_trait;

/// Reads templates from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTemplateSource;

#[async_trait]
impl TemplateSource for FileTemplateSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, ExportError> {
        let path = match TemplateLocation::parse(location)? {
            TemplateLocation::Local(path) => path,
            TemplateLocation::Remote(_) => {
                return Err(ExportError::template_fetch(
                    location,
                    "remote location handed to the file source",
                ))
            }
        };

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| ExportError::template_fetch(location, e.to_string()))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Template read from disk");
        Ok(bytes)
    }
}
