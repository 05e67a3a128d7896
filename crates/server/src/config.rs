//! Process configuration for the HTTP service.

use std::net::SocketAddr;
use std::path::PathBuf;

use vitrine_core::resolve::DEFAULT_POST_LIMIT;
use vitrine_core::{CmsConfig, ConversionsConfig, Result, SitePages, VitrineError};

pub const ENV_ADDR: &str = "VITRINE_ADDR";
pub const ENV_FALLBACK_FILE: &str = "VITRINE_FALLBACK_FILE";
pub const ENV_POST_LIMIT: &str = "VITRINE_POST_LIMIT";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub cms: CmsConfig,
    pub conversions: ConversionsConfig,
    /// Replaces the built-in fallback table when set.
    pub fallback_file: Option<PathBuf>,
    pub pages: SitePages,
    /// Posts per blog listing.
    pub post_limit: u32,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup(ENV_ADDR).filter(|v| !v.trim().is_empty());
        let addr = raw_addr
            .as_deref()
            .unwrap_or(DEFAULT_ADDR)
            .trim()
            .parse()
            .map_err(|e| VitrineError::Config(format!("{} is not a socket address: {}", ENV_ADDR, e)))?;

        let post_limit = match lookup(ENV_POST_LIMIT).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| VitrineError::Config(format!("{} is not a number: {}", ENV_POST_LIMIT, e)))?,
            None => DEFAULT_POST_LIMIT,
        };

        Ok(Self {
            addr,
            pages: SitePages::from_lookup(&lookup),
            post_limit,
            cms: CmsConfig::from_lookup(&lookup)?,
            conversions: ConversionsConfig::from_lookup(&lookup),
            fallback_file: lookup(ENV_FALLBACK_FILE).filter(|v| !v.trim().is_empty()).map(PathBuf::from),
        })
    }
}
