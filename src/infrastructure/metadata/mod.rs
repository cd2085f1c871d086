//! HTTP Metadata Provider
//!
//! `reqwest` client for the external bibliographic API. Books are looked up
//! with `GET {api_url}/books/{isbn}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::application::services::{BookMetadata, MetadataError, MetadataProvider};
use crate::config::MetadataSettings;

/// Metadata provider backed by a remote HTTP API.
#[derive(Debug, Clone)]
pub struct HttpMetadataProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpMetadataProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, MetadataError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MetadataError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Build a provider from configuration; `None` when no API URL is set.
    pub fn from_settings(settings: &MetadataSettings) -> Result<Option<Self>, MetadataError> {
        let Some(url) = settings.api_url.as_deref().filter(|u| !u.trim().is_empty()) else {
            return Ok(None);
        };

        Self::new(
            url,
            settings.api_key.clone().filter(|k| !k.is_empty()),
            Duration::from_secs(settings.timeout_secs),
        )
        .map(Some)
    }
}

#[async_trait]
impl MetadataProvider for HttpMetadataProvider {
    async fn fetch(&self, isbn: &str) -> Result<BookMetadata, MetadataError> {
        let url = format!("{}/books/{}", self.base_url, isbn);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(isbn, error = %e, "Metadata request failed");
            MetadataError::Request(e.to_string())
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(isbn, status = status.as_u16(), "Metadata API returned an error");
            return Err(MetadataError::Status(status.as_u16()));
        }

        let metadata = response
            .json::<BookMetadata>()
            .await
            .map_err(|e| MetadataError::Decode(e.to_string()))?;

        tracing::debug!(isbn, "Fetched book metadata");
        Ok(metadata)
    }
}
