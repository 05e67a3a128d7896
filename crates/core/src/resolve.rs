//! Route resolution.
//!
//! A [`Resolver`] turns a logical site path into a view model. CMS content
//! wins; the static [`FallbackTable`] is consulted when the CMS fetch fails,
//! the page or item is missing, or the mapper rejects the data. Pages with no
//! fallback entry end up [`Resolution::NotFound`] when the CMS has nothing for
//! them and [`Resolution::Unavailable`] when the CMS could not be reached.
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::RouteKind;
//!
//! assert_eq!(RouteKind::classify("/services/web-development"), RouteKind::Service("web-development".into()));
//! assert_eq!(RouteKind::classify("/services/unknown"), RouteKind::Unknown);
//! assert_eq!(RouteKind::classify("/blog/category/news"), RouteKind::Blog(Some("news".into())));
//! ```

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::Result;
use crate::acf::{RawCategory, RawPage, RawPost};
use crate::client::{ContentSource, PageRef};
use crate::fallback::FallbackTable;
use crate::mapper;
use crate::seo::SeoMetadata;
use crate::slots::{APPLICATION_SLOTS, SERVICE_SLOTS};
use crate::view::{
    AboutViewModel, ApplicationViewModel, ApplicationsIndexViewModel, BlogListingViewModel, BlogPostViewModel,
    ContactViewModel, HomeViewModel, InfoPageViewModel, ServiceViewModel, ServicesIndexViewModel, SiteChrome,
};

/// Posts per blog listing page.
pub const DEFAULT_POST_LIMIT: u32 = 12;

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9%_]+(?:-[A-Za-z0-9%_]+)*$").expect("slug pattern is valid"));

fn is_slug(segment: &str) -> bool {
    SLUG.is_match(segment)
}

/// The page type a path refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Home,
    About,
    Contact,
    Privacy,
    ServicesIndex,
    Service(String),
    ApplicationsIndex,
    Application(String),
    /// Blog listing, optionally filtered by category slug.
    Blog(Option<String>),
    Post(String),
    Unknown,
}

impl RouteKind {
    pub fn classify(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] | ["home"] => RouteKind::Home,
            ["about"] => RouteKind::About,
            ["contact"] => RouteKind::Contact,
            ["privacy"] | ["privacy-policy"] => RouteKind::Privacy,
            ["services"] => RouteKind::ServicesIndex,
            ["services", slug] if SERVICE_SLOTS.contains(slug) => RouteKind::Service(slug.to_string()),
            ["applications"] => RouteKind::ApplicationsIndex,
            ["applications", slug] if APPLICATION_SLOTS.contains(slug) => RouteKind::Application(slug.to_string()),
            ["blog"] => RouteKind::Blog(None),
            ["blog", "category", slug] if is_slug(slug) => RouteKind::Blog(Some(slug.to_string())),
            ["blog", slug] if *slug != "category" && is_slug(slug) => RouteKind::Post(slug.to_string()),
            _ => RouteKind::Unknown,
        }
    }

    /// Canonical frontend path, as sent to the SEO plugin.
    pub fn path(&self) -> String {
        match self {
            RouteKind::Home => "/".to_string(),
            RouteKind::About => "/about".to_string(),
            RouteKind::Contact => "/contact".to_string(),
            RouteKind::Privacy => "/privacy".to_string(),
            RouteKind::ServicesIndex => "/services".to_string(),
            RouteKind::Service(slug) => format!("/services/{}", slug),
            RouteKind::ApplicationsIndex => "/applications".to_string(),
            RouteKind::Application(slug) => format!("/applications/{}", slug),
            RouteKind::Blog(None) => "/blog".to_string(),
            RouteKind::Blog(Some(slug)) => format!("/blog/category/{}", slug),
            RouteKind::Post(slug) => format!("/blog/{}", slug),
            RouteKind::Unknown => String::new(),
        }
    }
}

/// Where a resolved view came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Cms,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    Found { view: T, origin: Origin },
    NotFound,
    /// The CMS could not be reached and the page has no static fallback.
    Unavailable,
}

impl<T> Resolution<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Resolution::Found { view, origin } => Resolution::Found { view: f(view), origin },
            Resolution::NotFound => Resolution::NotFound,
            Resolution::Unavailable => Resolution::Unavailable,
        }
    }

    pub fn view(&self) -> Option<&T> {
        match self {
            Resolution::Found { view, .. } => Some(view),
            _ => None,
        }
    }

    pub fn into_view(self) -> Option<T> {
        match self {
            Resolution::Found { view, .. } => Some(view),
            _ => None,
        }
    }

    pub fn origin(&self) -> Option<Origin> {
        match self {
            Resolution::Found { origin, .. } => Some(*origin),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found { .. })
    }
}

/// Any resolved page, tagged by type for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PageView {
    Home(HomeViewModel),
    About(AboutViewModel),
    Contact(ContactViewModel),
    Privacy(InfoPageViewModel),
    ServicesIndex(ServicesIndexViewModel),
    Service(ServiceViewModel),
    ApplicationsIndex(ApplicationsIndexViewModel),
    Application(ApplicationViewModel),
    BlogListing(BlogListingViewModel),
    BlogPost(BlogPostViewModel),
}

/// A resolved page together with its SEO head.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBundle {
    pub route: String,
    pub view: PageView,
    pub origin: Origin,
    pub seo: SeoMetadata,
    pub json_ld: Vec<Value>,
}

/// CMS page identifiers for each page type.
///
/// Each entry can be overridden from the environment with `CMS_PAGE_<NAME>`
/// (`CMS_PAGE_PRIVACY=42` or `CMS_PAGE_BLOG=journal`).
#[derive(Debug, Clone, PartialEq)]
pub struct SitePages {
    pub home: PageRef,
    pub services: PageRef,
    pub applications: PageRef,
    pub about: PageRef,
    pub contact: PageRef,
    pub privacy: PageRef,
    pub blog: PageRef,
}

impl Default for SitePages {
    fn default() -> Self {
        Self {
            home: PageRef::slug("home"),
            services: PageRef::slug("services"),
            applications: PageRef::slug("applications"),
            about: PageRef::slug("about"),
            contact: PageRef::slug("contact"),
            privacy: PageRef::slug("privacy-policy"),
            blog: PageRef::slug("blog"),
        }
    }
}

impl SitePages {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let pick = |name: &str, default: PageRef| {
            lookup(&format!("CMS_PAGE_{}", name))
                .filter(|v| !v.trim().is_empty())
                .map(|v| PageRef::parse(&v))
                .unwrap_or(default)
        };
        Self {
            home: pick("HOME", defaults.home),
            services: pick("SERVICES", defaults.services),
            applications: pick("APPLICATIONS", defaults.applications),
            about: pick("ABOUT", defaults.about),
            contact: pick("CONTACT", defaults.contact),
            privacy: pick("PRIVACY", defaults.privacy),
            blog: pick("BLOG", defaults.blog),
        }
    }
}

/// Result of the CMS half of a resolution.
enum Fetched<T> {
    View(T),
    Missing,
    Failed,
}

#[derive(Debug, Clone)]
pub struct Resolver<S> {
    source: S,
    fallback: Arc<FallbackTable>,
    pages: SitePages,
    post_limit: u32,
}

impl<S: ContentSource> Resolver<S> {
    pub fn new(source: S, fallback: FallbackTable) -> Self {
        Self { source, fallback: Arc::new(fallback), pages: SitePages::default(), post_limit: DEFAULT_POST_LIMIT }
    }

    pub fn with_pages(mut self, pages: SitePages) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_post_limit(mut self, limit: u32) -> Self {
        self.post_limit = limit;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn fallback(&self) -> &FallbackTable {
        &self.fallback
    }

    async fn page(&self, name: &str, page: &PageRef) -> Fetched<RawPage> {
        match self.source.fetch_page(page).await {
            Ok(Some(raw)) => Fetched::View(raw),
            Ok(None) => {
                tracing::debug!(page = name, id = %page, "page not found in CMS");
                Fetched::Missing
            }
            Err(e) => {
                tracing::warn!(page = name, id = %page, error = %e, "CMS page fetch failed");
                Fetched::Failed
            }
        }
    }

    /// Fetches a page and maps it; a mapper rejection counts as missing.
    async fn mapped<T>(&self, name: &str, page: &PageRef, map: impl FnOnce(&RawPage) -> Option<T>) -> Fetched<T> {
        match self.page(name, page).await {
            Fetched::View(raw) => match map(&raw) {
                Some(view) => Fetched::View(view),
                None => {
                    tracing::debug!(page = name, "CMS page lacks its header block");
                    Fetched::Missing
                }
            },
            Fetched::Missing => Fetched::Missing,
            Fetched::Failed => Fetched::Failed,
        }
    }

    fn settle<T>(route: &str, fetched: Fetched<T>, fallback: Option<T>) -> Resolution<T> {
        match (fetched, fallback) {
            (Fetched::View(view), _) => Resolution::Found { view, origin: Origin::Cms },
            (_, Some(view)) => {
                tracing::warn!(route, "serving static fallback");
                Resolution::Found { view, origin: Origin::Fallback }
            }
            (Fetched::Missing, None) => {
                tracing::debug!(route, "not found");
                Resolution::NotFound
            }
            (Fetched::Failed, None) => {
                tracing::warn!(route, "content unavailable");
                Resolution::Unavailable
            }
        }
    }

    pub async fn resolve_home(&self) -> Resolution<HomeViewModel> {
        let fetched = self.mapped("home", &self.pages.home, mapper::map_home).await;
        Self::settle("/", fetched, self.fallback.home().cloned())
    }

    pub async fn resolve_about(&self) -> Resolution<AboutViewModel> {
        let fetched = self.mapped("about", &self.pages.about, mapper::map_about).await;
        Self::settle("/about", fetched, None)
    }

    pub async fn resolve_contact(&self) -> Resolution<ContactViewModel> {
        let fetched = self.mapped("contact", &self.pages.contact, mapper::map_contact).await;
        Self::settle("/contact", fetched, None)
    }

    pub async fn resolve_privacy(&self) -> Resolution<InfoPageViewModel> {
        let fetched = self.mapped("privacy", &self.pages.privacy, |page| Some(mapper::map_info_page(page))).await;
        Self::settle("/privacy", fetched, None)
    }

    pub async fn resolve_services_index(&self) -> Resolution<ServicesIndexViewModel> {
        let fetched = self.mapped("services", &self.pages.services, mapper::map_services_index).await;
        Self::settle("/services", fetched, None)
    }

    pub async fn resolve_applications_index(&self) -> Resolution<ApplicationsIndexViewModel> {
        let fetched = self.mapped("applications", &self.pages.applications, mapper::map_applications_index).await;
        Self::settle("/applications", fetched, None)
    }

    /// Resolves one service detail page. Unknown identifiers are not found
    /// without touching the CMS.
    pub async fn resolve_service(&self, slug: &str) -> Resolution<ServiceViewModel> {
        let route = format!("/services/{}", slug);
        if !SERVICE_SLOTS.contains(slug) {
            tracing::debug!(%route, "unknown service identifier");
            return Resolution::NotFound;
        }

        let fetched = self
            .mapped("services", &self.pages.services, |page| {
                let (_, items) = mapper::service_blocks(page);
                let refs: Vec<_> = items.iter().collect();
                let (pos, how) = SERVICE_SLOTS.locate(slug, &refs)?;
                tracing::debug!(slug, pos, ?how, "located service entry");
                mapper::map_service(slug, refs[pos])
            })
            .await;
        Self::settle(&route, fetched, self.fallback.service(slug).cloned())
    }

    pub async fn resolve_application(&self, slug: &str) -> Resolution<ApplicationViewModel> {
        let route = format!("/applications/{}", slug);
        if !APPLICATION_SLOTS.contains(slug) {
            tracing::debug!(%route, "unknown application identifier");
            return Resolution::NotFound;
        }

        let fetched = self
            .mapped("applications", &self.pages.applications, |page| {
                let (_, items) = mapper::application_blocks(page);
                let refs: Vec<_> = items.iter().collect();
                let (pos, how) = APPLICATION_SLOTS.locate(slug, &refs)?;
                tracing::debug!(slug, pos, ?how, "located application entry");
                mapper::map_application(slug, refs[pos])
            })
            .await;
        Self::settle(&route, fetched, self.fallback.application(slug).cloned())
    }

    /// Blog listing. The blog page only contributes an optional hero; an
    /// unknown category is not found; a failed posts fetch is unavailable.
    pub async fn resolve_blog(&self, category: Option<&str>) -> Resolution<BlogListingViewModel> {
        let (page, posts) = tokio::join!(self.page("blog", &self.pages.blog), self.listing_posts(category));

        let (category, posts) = match posts {
            Ok(Some(found)) => found,
            Ok(None) => {
                tracing::debug!(?category, "unknown blog category");
                return Resolution::NotFound;
            }
            Err(e) => {
                tracing::warn!(?category, error = %e, "posts fetch failed");
                return Resolution::Unavailable;
            }
        };

        let page = match page {
            Fetched::View(raw) => Some(raw),
            _ => None,
        };
        let category = category.as_ref().map(mapper::map_category);
        Resolution::Found { view: mapper::map_blog_listing(page.as_ref(), category, &posts), origin: Origin::Cms }
    }

    /// `Ok(None)` when the category slug is unknown.
    async fn listing_posts(&self, category: Option<&str>) -> Result<Option<(Option<RawCategory>, Vec<RawPost>)>> {
        let Some(slug) = category else {
            return Ok(Some((None, self.source.fetch_posts(self.post_limit).await?)));
        };
        let Some(found) = self.source.fetch_category_by_slug(slug).await else {
            return Ok(None);
        };
        let posts = self.source.fetch_posts_by_category(found.id, self.post_limit).await?;
        Ok(Some((Some(found), posts)))
    }

    pub async fn resolve_post(&self, slug: &str) -> Resolution<BlogPostViewModel> {
        match self.source.fetch_post_by_slug(slug).await {
            Ok(Some(post)) => Resolution::Found { view: mapper::map_post(&post), origin: Origin::Cms },
            Ok(None) => {
                tracing::debug!(slug, "post not found");
                Resolution::NotFound
            }
            Err(e) => {
                tracing::warn!(slug, error = %e, "post fetch failed");
                Resolution::Unavailable
            }
        }
    }

    pub async fn resolve(&self, route: &RouteKind) -> Resolution<PageView> {
        match route {
            RouteKind::Home => self.resolve_home().await.map(PageView::Home),
            RouteKind::About => self.resolve_about().await.map(PageView::About),
            RouteKind::Contact => self.resolve_contact().await.map(PageView::Contact),
            RouteKind::Privacy => self.resolve_privacy().await.map(PageView::Privacy),
            RouteKind::ServicesIndex => self.resolve_services_index().await.map(PageView::ServicesIndex),
            RouteKind::Service(slug) => self.resolve_service(slug).await.map(PageView::Service),
            RouteKind::ApplicationsIndex => self.resolve_applications_index().await.map(PageView::ApplicationsIndex),
            RouteKind::Application(slug) => self.resolve_application(slug).await.map(PageView::Application),
            RouteKind::Blog(category) => self.resolve_blog(category.as_deref()).await.map(PageView::BlogListing),
            RouteKind::Post(slug) => self.resolve_post(slug).await.map(PageView::BlogPost),
            RouteKind::Unknown => Resolution::NotFound,
        }
    }

    /// Resolves `path` and fetches its SEO head concurrently.
    pub async fn resolve_bundle(&self, path: &str) -> Resolution<PageBundle> {
        let route = RouteKind::classify(path);
        if route == RouteKind::Unknown {
            tracing::debug!(path, "unknown route");
            return Resolution::NotFound;
        }

        let canonical = route.path();
        let (resolution, head) = tokio::join!(self.resolve(&route), self.source.fetch_seo_head(&canonical));
        let head = head.unwrap_or_default();

        match resolution {
            Resolution::Found { view, origin } => Resolution::Found {
                view: PageBundle { route: canonical, view, origin, seo: head.metadata, json_ld: head.json_ld },
                origin,
            },
            Resolution::NotFound => Resolution::NotFound,
            Resolution::Unavailable => Resolution::Unavailable,
        }
    }

    /// Site-wide decorative data; never fails.
    pub async fn site_chrome(&self) -> SiteChrome {
        match self.page("contact", &self.pages.contact).await {
            Fetched::View(raw) => mapper::map_site_chrome(&raw),
            _ => SiteChrome::default(),
        }
    }
}
