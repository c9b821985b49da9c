//! Product configuration trait for wizard binaries
//!
//! This trait defines the interface a generator service must implement so the wizard knows
//! where to fetch metadata, where to request archives and how to label the session.

use crate::error::{Result, WizardError};
use std::time::Duration;
use url::Url;

/// Upper bound for one whole HTTP exchange, body included
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound for establishing the TCP/TLS connection
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration trait for project-generation services
///
/// Each service implements this trait to define:
/// - Service identity (name, display name)
/// - Metadata and archive endpoints, with environment overrides
/// - The fixed project description sent with every request
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name
    fn name(&self) -> &'static str;

    /// Human-readable display name, shown in the screen header
    fn display_name(&self) -> &'static str;

    /// Default URL for fetching the metadata document
    fn default_metadata_url(&self) -> &'static str;

    /// Environment variable name for overriding the metadata URL
    fn metadata_url_env(&self) -> &'static str;

    /// Default URL the generated archive is requested from
    fn default_archive_url(&self) -> &'static str;

    /// Environment variable name for overriding the archive URL
    fn archive_url_env(&self) -> &'static str;

    /// Media type sent in the `Accept` header of the metadata request
    fn metadata_media_type(&self) -> &'static str {
        "application/json"
    }

    /// Description sent for every generated project
    fn project_description(&self) -> &'static str;

    /// File stem used when no artifact id was collected
    fn fallback_archive_stem(&self) -> &'static str {
        "starter"
    }

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }

    /// Timeout applied to the metadata and archive requests
    fn request_timeout(&self) -> Duration {
        DEFAULT_REQUEST_TIMEOUT
    }
}

/// HTTP client shared by the metadata and archive requests
pub(crate) fn http_client(user_agent: &str, timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Resolved endpoints for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub metadata: Url,
    pub archive: Url,
}

impl Endpoints {
    /// Resolve endpoints with precedence: explicit override, then environment, then default
    pub fn resolve<C: ProductConfig>(
        config: &C,
        metadata_override: Option<&str>,
        archive_override: Option<&str>,
    ) -> Result<Self> {
        let metadata = pick_url(
            metadata_override,
            config.metadata_url_env(),
            config.default_metadata_url(),
        )?;
        let archive = pick_url(
            archive_override,
            config.archive_url_env(),
            config.default_archive_url(),
        )?;
        Ok(Self { metadata, archive })
    }
}

fn pick_url(explicit: Option<&str>, env_name: &str, default: &str) -> Result<Url> {
    let url_str = match explicit {
        Some(url) => url.to_string(),
        None => std::env::var(env_name).unwrap_or_else(|_| default.to_string()),
    };
    Url::parse(&url_str).map_err(|e| WizardError::InvalidUrl {
        url: url_str.clone(),
        reason: e.to_string(),
    })
}
