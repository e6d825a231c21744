use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info};

/// Where the published HTML page comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlSource {
    /// A saved page on disk
    File(PathBuf),
    /// A public share URL
    Url(String),
}

/// Configuration for fetching pages over HTTP
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with the request
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("transcribble/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    /// Create config from environment variables
    ///
    /// `TRANSCRIBBLE_FETCH_TIMEOUT_SECS` and `TRANSCRIBBLE_USER_AGENT` override
    /// the defaults when set.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var("TRANSCRIBBLE_FETCH_TIMEOUT_SECS").ok(),
            std::env::var("TRANSCRIBBLE_USER_AGENT").ok(),
        )
    }

    fn from_vars(timeout: Option<String>, user_agent: Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(timeout) = timeout {
            config.timeout_secs = timeout
                .trim()
                .parse()
                .with_context(|| format!("Invalid TRANSCRIBBLE_FETCH_TIMEOUT_SECS: {:?}", timeout))?;
        }
        if let Some(user_agent) = user_agent.filter(|ua| !ua.trim().is_empty()) {
            config.user_agent = user_agent;
        }
        Ok(config)
    }
}

/// Read a saved HTML page (must be UTF-8)
pub fn read_html_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
}

/// Fetch a page over HTTP, failing on non-success statuses
pub async fn fetch_html(url: &str, config: &FetchConfig) -> Result<String> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .context("Failed to build HTTP client")?;

    info!("Fetching {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch URL: {}", url))?
        .error_for_status()
        .with_context(|| format!("Failed to fetch URL: {}", url))?;
    debug!("Response status: {}", response.status());

    response
        .text()
        .await
        .context("Failed to read response body")
}

/// Load HTML from either source
pub async fn load_html(source: &HtmlSource, config: &FetchConfig) -> Result<String> {
    match source {
        HtmlSource::File(path) => {
            info!("Loading HTML from {:?}", path);
            read_html_file(path)
        }
        HtmlSource::Url(url) => fetch_html(url, config).await,
    }
}
