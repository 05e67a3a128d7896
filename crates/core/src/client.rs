//! WordPress REST client.
//!
//! [`CmsClient`] wraps one shared `reqwest::Client` and one shared
//! [`ResponseCache`]. Cloning the client is cheap and clones share both.
//!
//! Every request asks for standardized ACF formatting (`acf_format=standard`);
//! post requests also ask for embedded relations (`_embed`).

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::acf::{RawCategory, RawPage, RawPost};
use crate::cache::ResponseCache;
use crate::config::CmsConfig;
use crate::seo::SeoHead;
use crate::{Result, VitrineError};

/// WordPress caps `per_page` at 100.
pub const MAX_PER_PAGE: u32 = 100;

/// Longest slice of an error body kept in [`VitrineError::Fetch`].
const MAX_ERROR_BODY: usize = 512;

/// A page identifier: numeric id or slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageRef {
    Id(u64),
    Slug(String),
}

impl PageRef {
    /// All-digit identifiers are ids, everything else is a slug.
    pub fn parse(identifier: &str) -> Self {
        let identifier = identifier.trim();
        if !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
            && let Ok(id) = identifier.parse()
        {
            return PageRef::Id(id);
        }
        PageRef::Slug(identifier.to_string())
    }

    pub fn slug(slug: impl Into<String>) -> Self {
        PageRef::Slug(slug.into())
    }
}

impl std::fmt::Display for PageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageRef::Id(id) => write!(f, "{}", id),
            PageRef::Slug(slug) => f.write_str(slug),
        }
    }
}

/// Everything the resolver needs from a content backend.
///
/// [`CmsClient`] is the production implementation; tests plug in in-memory
/// sources.
pub trait ContentSource: Send + Sync {
    fn fetch_page(&self, page: &PageRef) -> impl Future<Output = Result<Option<RawPage>>> + Send;

    fn fetch_posts(&self, limit: u32) -> impl Future<Output = Result<Vec<RawPost>>> + Send;

    fn fetch_post_by_slug(&self, slug: &str) -> impl Future<Output = Result<Option<RawPost>>> + Send;

    /// Non-critical: failures are reported as `None`.
    fn fetch_category_by_slug(&self, slug: &str) -> impl Future<Output = Option<RawCategory>> + Send;

    fn fetch_posts_by_category(&self, category_id: u64, limit: u32)
    -> impl Future<Output = Result<Vec<RawPost>>> + Send;

    /// Non-critical: failures and `success: false` are reported as `None`.
    fn fetch_seo_head(&self, path: &str) -> impl Future<Output = Option<SeoHead>> + Send;
}

#[derive(Debug, Deserialize)]
struct HeadResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    head: String,
}

#[derive(Debug, Clone)]
pub struct CmsClient {
    http: Client,
    cache: ResponseCache,
    config: CmsConfig,
}

impl CmsClient {
    pub fn new(config: CmsConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(VitrineError::Http)?;
        let cache = ResponseCache::new(Duration::from_secs(config.cache_ttl));
        Ok(Self { http, cache, config })
    }

    pub fn config(&self) -> &CmsConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    fn url(&self, route: &str, query: &[(&str, &str)], flags: &[&str]) -> Result<Url> {
        let mut url = self.config.endpoint(route)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            for flag in flags {
                pairs.append_key_only(flag);
            }
        }
        Ok(url)
    }

    fn transport_error(&self, err: reqwest::Error) -> VitrineError {
        if err.is_timeout() { VitrineError::Timeout { timeout: self.config.timeout } } else { VitrineError::Http(err) }
    }

    /// GETs `url` and decodes the body as JSON, consulting the cache first.
    pub async fn get_json(&self, url: Url) -> Result<Value> {
        let key = url.to_string();
        if let Some(body) = self.cache.get(&key) {
            tracing::debug!(url = %key, "cache hit");
            return Ok(body);
        }

        let response = self
            .http
            .get(url)
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let mut message = response.text().await.unwrap_or_default();
            if message.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !message.is_char_boundary(cut) {
                    cut -= 1;
                }
                message.truncate(cut);
            }
            return Err(VitrineError::Fetch { status: status.as_u16(), message });
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let body: Value = serde_json::from_slice(&bytes)?;
        self.cache.insert(key, body.clone());
        Ok(body)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let body = self.get_json(url).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Fetches a page by id or slug.
    ///
    /// A missing page is `Ok(None)`: an empty collection for slugs, a 404 for ids.
    pub async fn fetch_page(&self, page: &PageRef) -> Result<Option<RawPage>> {
        match page {
            PageRef::Id(id) => {
                let url = self.url(&format!("wp/v2/pages/{}", id), &[("acf_format", "standard")], &[])?;
                match self.get::<RawPage>(url).await {
                    Ok(page) => Ok(Some(page)),
                    Err(VitrineError::Fetch { status: 404, .. }) => Ok(None),
                    Err(e) => Err(e),
                }
            }
            PageRef::Slug(slug) => {
                let url = self.url("wp/v2/pages", &[("slug", slug), ("acf_format", "standard")], &[])?;
                let pages: Vec<RawPage> = self.get(url).await?;
                Ok(pages.into_iter().next())
            }
        }
    }

    pub async fn fetch_posts(&self, limit: u32) -> Result<Vec<RawPost>> {
        let per_page = clamp_limit(limit).to_string();
        let url = self.url("wp/v2/posts", &[("per_page", &per_page), ("acf_format", "standard")], &["_embed"])?;
        self.get(url).await
    }

    pub async fn fetch_post_by_slug(&self, slug: &str) -> Result<Option<RawPost>> {
        let url = self.url("wp/v2/posts", &[("slug", slug), ("acf_format", "standard")], &["_embed"])?;
        let posts: Vec<RawPost> = self.get(url).await?;
        Ok(posts.into_iter().next())
    }

    pub async fn fetch_category_by_slug(&self, slug: &str) -> Option<RawCategory> {
        let result = match self.url("wp/v2/categories", &[("slug", slug), ("acf_format", "standard")], &[]) {
            Ok(url) => self.get::<Vec<RawCategory>>(url).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(categories) => categories.into_iter().next(),
            Err(e) => {
                tracing::warn!(slug, error = %e, "category lookup failed");
                None
            }
        }
    }

    pub async fn fetch_posts_by_category(&self, category_id: u64, limit: u32) -> Result<Vec<RawPost>> {
        let category = category_id.to_string();
        let per_page = clamp_limit(limit).to_string();
        let url = self.url(
            "wp/v2/posts",
            &[("categories", &category), ("per_page", &per_page), ("acf_format", "standard")],
            &["_embed"],
        )?;
        self.get(url).await
    }

    /// Fetches and parses the SEO head for a frontend path such as `/services`.
    pub async fn fetch_seo_head(&self, path: &str) -> Option<SeoHead> {
        let target = self.config.site_path(path);
        let result = match self.url("rankmath/v1/getHead", &[("url", &target)], &[]) {
            Ok(url) => self.get::<HeadResponse>(url).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(HeadResponse { success: true, head }) => Some(SeoHead::parse(&head)),
            Ok(_) => {
                tracing::debug!(url = %target, "SEO plugin reported no head");
                None
            }
            Err(e) => {
                tracing::warn!(url = %target, error = %e, "SEO head fetch failed");
                None
            }
        }
    }
}

impl ContentSource for CmsClient {
    fn fetch_page(&self, page: &PageRef) -> impl Future<Output = Result<Option<RawPage>>> + Send {
        CmsClient::fetch_page(self, page)
    }

    fn fetch_posts(&self, limit: u32) -> impl Future<Output = Result<Vec<RawPost>>> + Send {
        CmsClient::fetch_posts(self, limit)
    }

    fn fetch_post_by_slug(&self, slug: &str) -> impl Future<Output = Result<Option<RawPost>>> + Send {
        CmsClient::fetch_post_by_slug(self, slug)
    }

    fn fetch_category_by_slug(&self, slug: &str) -> impl Future<Output = Option<RawCategory>> + Send {
        CmsClient::fetch_category_by_slug(self, slug)
    }

    fn fetch_posts_by_category(
        &self, category_id: u64, limit: u32,
    ) -> impl Future<Output = Result<Vec<RawPost>>> + Send {
        CmsClient::fetch_posts_by_category(self, category_id, limit)
    }

    fn fetch_seo_head(&self, path: &str) -> impl Future<Output = Option<SeoHead>> + Send {
        CmsClient::fetch_seo_head(self, path)
    }
}

fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_PER_PAGE)
}
