//! Metadata fetching from the generator service
//!
//! The document is requested once per session. The raw body is spooled to a temporary file
//! that stays on disk for as long as the returned [`FetchedMetadata`] is alive and is removed
//! when it is dropped.

use super::document::MetadataDocument;
use crate::error::{Result, WizardError};
use crate::product::{self, ProductConfig, DEFAULT_REQUEST_TIMEOUT};
use reqwest::header::ACCEPT;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::TempPath;
use tracing::debug;
use url::Url;

/// A parsed metadata document together with its temporary spool file
#[derive(Debug)]
pub struct FetchedMetadata {
    pub document: MetadataDocument,
    spool: TempPath,
}

impl FetchedMetadata {
    /// Location of the temporary copy of the raw document
    pub fn spool_path(&self) -> &Path {
        &self.spool
    }
}

/// Client for the metadata endpoint
pub struct MetadataClient {
    url: Url,
    media_type: &'static str,
    client: reqwest::Client,
}

impl MetadataClient {
    /// Create a new client with a custom user agent and the default timeout
    pub fn new(url: Url, media_type: &'static str, user_agent: &str) -> Self {
        Self::with_timeout(url, media_type, user_agent, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client whose request fails with [`WizardError::Network`] after `timeout`
    pub fn with_timeout(
        url: Url,
        media_type: &'static str,
        user_agent: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            url,
            media_type,
            client: product::http_client(user_agent, timeout),
        }
    }

    /// Create a client from a product config and a resolved metadata URL
    pub fn from_config<C: ProductConfig>(config: &C, url: Url) -> Self {
        Self::with_timeout(
            url,
            config.metadata_media_type(),
            config.user_agent(),
            config.request_timeout(),
        )
    }

    /// Fetch, spool and parse the metadata document
    pub async fn fetch(&self) -> Result<FetchedMetadata> {
        debug!(url = %self.url, "fetching metadata");

        let network_error = |reason: String| WizardError::Network {
            url: self.url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, self.media_type)
            .send()
            .await
            .map_err(|e| network_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(network_error(format!("HTTP {}", response.status())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| network_error(e.to_string()))?;

        if body.is_empty() {
            return Err(WizardError::EmptyResponse {
                url: self.url.to_string(),
            });
        }

        let mut spool = tempfile::Builder::new()
            .prefix("initializr-metadata-")
            .suffix(".json")
            .tempfile()?;
        spool.write_all(&body)?;
        spool.flush()?;
        let spool = spool.into_temp_path();
        debug!(path = %spool.display(), bytes = body.len(), "metadata spooled");

        let raw = std::fs::read(&spool)?;
        let document = MetadataDocument::from_slice(&raw)?;

        Ok(FetchedMetadata { document, spool })
    }
}
