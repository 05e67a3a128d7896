//! Client configuration.
//!
//! The CMS location and transport limits live in an explicit [`CmsConfig`]
//! that is built once at startup and handed to [`CmsClient::new`](crate::CmsClient::new).
//! Nothing in the crate reads the environment at call time.
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::CmsConfig;
//!
//! let config = CmsConfig::builder()
//!     .base_url("https://cms.example.com")
//!     .unwrap()
//!     .timeout(5)
//!     .cache_ttl(120)
//!     .build();
//! assert_eq!(config.timeout, 5);
//! ```

use url::Url;

use crate::{Result, VitrineError};

/// Environment variable holding the WordPress base URL.
pub const ENV_CMS_BASE_URL: &str = "CMS_BASE_URL";
/// Environment variable holding the public frontend URL used for SEO lookups.
pub const ENV_SITE_URL: &str = "SITE_URL";
/// Environment variable overriding the per-request timeout (seconds).
pub const ENV_CMS_TIMEOUT: &str = "CMS_TIMEOUT_SECS";
/// Environment variable overriding the response cache TTL (seconds).
pub const ENV_CMS_CACHE_TTL: &str = "CMS_CACHE_TTL_SECS";

/// Configuration for talking to the WordPress REST API.
#[derive(Debug, Clone)]
pub struct CmsConfig {
    /// WordPress origin, e.g. `https://cms.example.com`.
    pub base_url: Url,
    /// Public frontend origin; SEO heads are requested for `site_url + path`.
    pub site_url: Url,
    /// Request timeout in seconds (default: 10).
    pub timeout: u64,
    /// Response cache lifetime in seconds (default: 60, 0 disables caching).
    pub cache_ttl: u64,
    /// User-Agent sent with every CMS request.
    pub user_agent: String,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:8000").expect("static URL is valid"),
            site_url: Url::parse("http://localhost:3000").expect("static URL is valid"),
            timeout: 10,
            cache_ttl: 60,
            user_agent: format!("vitrine/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CmsConfig {
    /// Creates a new builder for CmsConfig.
    pub fn builder() -> CmsConfigBuilder {
        CmsConfigBuilder::new()
    }

    /// Reads the configuration from process environment variables.
    ///
    /// `CMS_BASE_URL` is required; every other value falls back to its default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = lookup(ENV_CMS_BASE_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| VitrineError::Config(format!("{} is not set", ENV_CMS_BASE_URL)))?;

        let mut builder = Self::builder().base_url(&base)?;

        if let Some(site) = lookup(ENV_SITE_URL).filter(|v| !v.trim().is_empty()) {
            builder = builder.site_url(&site)?;
        }
        if let Some(timeout) = lookup(ENV_CMS_TIMEOUT) {
            builder = builder.timeout(parse_secs(ENV_CMS_TIMEOUT, &timeout)?);
        }
        if let Some(ttl) = lookup(ENV_CMS_CACHE_TTL) {
            builder = builder.cache_ttl(parse_secs(ENV_CMS_CACHE_TTL, &ttl)?);
        }

        Ok(builder.build())
    }

    /// Joins a REST route (e.g. `wp/v2/pages`) onto the CMS base URL.
    pub fn endpoint(&self, route: &str) -> Result<Url> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(&format!("wp-json/{}", route.trim_start_matches('/')))
            .map_err(|e| VitrineError::InvalidUrl(e.to_string()))
    }

    /// Absolute frontend URL for a logical site path.
    pub fn site_path(&self, path: &str) -> String {
        let origin = self.site_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() { format!("{}/", origin) } else { format!("{}/{}", origin, path) }
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| VitrineError::Config(format!("{} must be a whole number of seconds, got {:?}", key, raw)))
}

fn parse_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| VitrineError::InvalidUrl(format!("{}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(VitrineError::InvalidUrl(format!("unsupported scheme {:?} in {}", other, raw))),
    }
}

/// Builder for CmsConfig.
pub struct CmsConfigBuilder {
    config: CmsConfig,
}

impl CmsConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: CmsConfig::default() }
    }

    /// Sets the WordPress base URL.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::InvalidUrl`] if the value is not an http(s) URL.
    pub fn base_url(mut self, value: &str) -> Result<Self> {
        self.config.base_url = parse_url(value)?;
        Ok(self)
    }

    /// Sets the public frontend URL.
    pub fn site_url(mut self, value: &str) -> Result<Self> {
        self.config.site_url = parse_url(value)?;
        Ok(self)
    }

    /// Sets the request timeout in seconds.
    pub fn timeout(mut self, value: u64) -> Self {
        self.config.timeout = value;
        self
    }

    /// Sets the response cache lifetime in seconds.
    pub fn cache_ttl(mut self, value: u64) -> Self {
        self.config.cache_ttl = value;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.user_agent = value.into();
        self
    }

    /// Builds the config.
    pub fn build(self) -> CmsConfig {
        self.config
    }
}

impl Default for CmsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
