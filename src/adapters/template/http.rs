//! HTTP template download

use super::TemplateSource;
use crate::domain::ExportError;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Downloads templates over HTTP(S)
pub struct HttpTemplateSource {
    client: Client,
}

impl HttpTemplateSource {
    /// Builds a client with the given request timeout
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::TemplateFetch`] if the client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, ExportError> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(30)))
            .user_agent(concat!("logtrack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ExportError::template_fetch("<client>", format!("failed to build HTTP client: {e}"))
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, ExportError> {
        tracing::debug!(url = %location, "Downloading template");

        let response = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|e| ExportError::template_fetch(location, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ExportError::template_fetch(
                location,
                format!("server responded with {status}"),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExportError::template_fetch(location, e.to_string()))?;

        tracing::info!(url = %location, bytes = bytes.len(), "Template downloaded");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/template.docx")
            .with_status(200)
            .with_body("PK-bytes")
            .create_async()
            .await;

        let source = HttpTemplateSource::new(Duration::from_secs(5)).unwrap();
        let bytes = source
            .fetch(&format!("{}/template.docx", server.url()))
            .await
            .unwrap();

        assert_eq!(bytes, b"PK-bytes");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing.docx")
            .with_status(404)
            .create_async()
            .await;

        let source = HttpTemplateSource::new(Duration::from_secs(5)).unwrap();
        let url = format!("{}/missing.docx", server.url());
        let err = source.fetch(&url).await.unwrap_err();

        match err {
            ExportError::TemplateFetch { url: failed, message } => {
                assert_eq!(failed, url);
                assert!(message.contains("404"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
