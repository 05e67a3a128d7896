pub mod acf;
pub mod cache;
pub mod client;
pub mod config;
pub mod conversions;
pub mod error;
pub mod fallback;
pub mod mapper;
pub mod resolve;
pub mod seo;
pub mod slots;
pub mod view;

pub use cache::ResponseCache;
pub use client::{CmsClient, ContentSource, PageRef};
pub use config::{CmsConfig, CmsConfigBuilder};
pub use conversions::{ConversionsClient, ConversionsConfig, Relayed, augment_events};
pub use error::{Result, VitrineError};
pub use fallback::FallbackTable;
pub use resolve::{Origin, PageBundle, PageView, Resolution, Resolver, RouteKind, SitePages};
pub use seo::{SeoHead, SeoMetadata, extract_json_ld, parse_metadata};
pub use view::SiteChrome;
#[doc(hidden)]
pub use slots::{APPLICATION_SLOTS, SERVICE_SLOTS, SlotTable};
