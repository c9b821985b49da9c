//! Archive download and optional extraction

use crate::error::{Result, WizardError};
use crate::product::{self, ProductConfig, DEFAULT_REQUEST_TIMEOUT};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;
use url::Url;
use zip::ZipArchive;

/// Extension of the generated archive
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Downloads the generated project archive
pub struct ArchiveDownloader {
    base: Url,
    output_dir: PathBuf,
    client: reqwest::Client,
}

impl ArchiveDownloader {
    /// Create a new downloader with a custom user agent and the default timeout
    pub fn new(base: Url, output_dir: PathBuf, user_agent: &str) -> Self {
        Self::with_timeout(base, output_dir, user_agent, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a downloader whose request fails with [`WizardError::Download`] after `timeout`
    pub fn with_timeout(
        base: Url,
        output_dir: PathBuf,
        user_agent: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            base,
            output_dir,
            client: product::http_client(user_agent, timeout),
        }
    }

    /// Create a downloader from a product config and a resolved archive URL
    pub fn from_config<C: ProductConfig>(config: &C, base: Url, output_dir: PathBuf) -> Self {
        Self::with_timeout(
            base,
            output_dir,
            config.user_agent(),
            config.request_timeout(),
        )
    }

    /// Full request URL for an already-encoded query string
    ///
    /// A query already present on the base URL is kept and the wizard's pairs are appended
    /// after it. Any fragment on the base is dropped.
    pub fn request_url(&self, query: &str) -> String {
        let mut url = self.base.clone();
        url.set_fragment(None);
        if query.is_empty() {
            return url.to_string();
        }
        let separator = match url.query() {
            None => "?",
            Some("") => "",
            Some(_) => "&",
        };
        format!("{}{}{}", url, separator, query)
    }

    /// Where the archive for `stem` is written
    pub fn archive_path(&self, stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", stem, ARCHIVE_EXTENSION))
    }

    /// Request the archive and write the body verbatim to `<output_dir>/<stem>.zip`
    pub async fn download(&self, query: &str, stem: &str) -> Result<PathBuf> {
        let url = self.request_url(query);
        debug!(%url, "requesting archive");

        let download_error = |reason: String| WizardError::Download {
            url: url.clone(),
            reason,
        };

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| download_error(e.to_string()))?;

        if !response.status().is_success() {
            return Err(download_error(format!("HTTP {}", response.status())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| download_error(e.to_string()))?;

        let path = self.archive_path(stem);
        fs::write(&path, &body).await?;
        debug!(path = %path.display(), bytes = body.len(), "archive written");

        Ok(path)
    }
}

/// Shell command that unpacks `archive` into `target`
pub fn extraction_hint(archive: &Path, target: &Path) -> String {
    format!("unzip {} -d {}", archive.display(), target.display())
}

/// Unpack `archive` into `target`, skipping entries that would escape it
pub fn extract_archive(archive: &Path, target: &Path) -> Result<usize> {
    let extract_error = |reason: String| WizardError::Extract {
        path: archive.to_path_buf(),
        reason,
    };

    let bytes = std::fs::read(archive)?;
    let mut zip = ZipArchive::new(Cursor::new(bytes)).map_err(|e| extract_error(e.to_string()))?;
    std::fs::create_dir_all(target)?;

    let mut written = 0;
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(|e| extract_error(e.to_string()))?;

        let Some(relative) = entry.enclosed_name() else {
            debug!(name = entry.name(), "skipping entry with unsafe path");
            continue;
        };
        let out_path = target.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(&out_path)?;
        std::io::copy(&mut entry, &mut file)?;
        written += 1;
    }

    Ok(written)
}
