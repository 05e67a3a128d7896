//! WordPress REST entities as they come over the wire.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::de::{Repeater, lenient, text};

/// `{ "rendered": "..." }` wrapper used for titles, excerpts and content.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Rendered {
    #[serde(deserialize_with = "text")]
    pub rendered: String,
}

/// A page entity from `wp/v2/pages`.
///
/// `acf` is kept as raw JSON; each page type decodes the part it needs via
/// [`RawPage::acf`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawPage {
    #[serde(deserialize_with = "lenient")]
    pub id: u64,
    #[serde(deserialize_with = "text")]
    pub slug: String,
    #[serde(deserialize_with = "text")]
    pub link: String,
    #[serde(deserialize_with = "text")]
    pub modified: String,
    #[serde(deserialize_with = "lenient")]
    pub title: Rendered,
    #[serde(deserialize_with = "lenient")]
    pub content: Rendered,
    pub acf: Value,
}

impl RawPage {
    /// Decodes the `acf` payload as `T`.
    ///
    /// `false`, `[]` or a missing payload decode to `T::default()`.
    pub fn acf<T>(&self) -> T
    where
        T: DeserializeOwned + Default,
    {
        T::deserialize(&self.acf).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmbeddedAuthor {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub slug: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MediaDetails {
    #[serde(deserialize_with = "lenient")]
    pub width: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmbeddedMedia {
    #[serde(deserialize_with = "text")]
    pub source_url: String,
    #[serde(deserialize_with = "text")]
    pub alt_text: String,
    #[serde(deserialize_with = "lenient")]
    pub media_details: MediaDetails,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmbeddedTerm {
    #[serde(deserialize_with = "lenient")]
    pub id: u64,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub slug: String,
    #[serde(deserialize_with = "text")]
    pub taxonomy: String,
}

/// The `_embed` payload of a post.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Embedded {
    pub author: Repeater<EmbeddedAuthor>,
    #[serde(rename = "wp:featuredmedia")]
    pub featured_media: Repeater<EmbeddedMedia>,
    /// One inner list per taxonomy (categories, tags, ...).
    #[serde(rename = "wp:term")]
    pub terms: Repeater<Repeater<EmbeddedTerm>>,
}

/// A post entity from `wp/v2/posts?_embed`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawPost {
    #[serde(deserialize_with = "lenient")]
    pub id: u64,
    #[serde(deserialize_with = "text")]
    pub slug: String,
    #[serde(deserialize_with = "text")]
    pub date: String,
    #[serde(deserialize_with = "text")]
    pub modified: String,
    #[serde(deserialize_with = "text")]
    pub link: String,
    #[serde(deserialize_with = "lenient")]
    pub title: Rendered,
    #[serde(deserialize_with = "lenient")]
    pub excerpt: Rendered,
    #[serde(deserialize_with = "lenient")]
    pub content: Rendered,
    pub categories: Repeater<u64>,
    #[serde(rename = "_embedded", deserialize_with = "lenient")]
    pub embedded: Embedded,
}

/// A category entity from `wp/v2/categories`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RawCategory {
    #[serde(deserialize_with = "lenient")]
    pub id: u64,
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub slug: String,
    #[serde(deserialize_with = "text")]
    pub description: String,
    #[serde(deserialize_with = "lenient")]
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acf::HomeAcf;
    use serde_json::json;

    #[test]
    fn test_acf_false_decodes_to_default() {
        let page: RawPage = serde_json::from_value(json!({"id": 7, "slug": "home", "acf": false})).unwrap();
        let acf: HomeAcf = page.acf();
        assert!(acf.home_content.is_empty());

        let page: RawPage = serde_json::from_value(json!({"id": 7, "acf": []})).unwrap();
        let acf: HomeAcf = page.acf();
        assert!(acf.home_content.is_empty());
    }

    #[test]
    fn test_post_embedded_payload() {
        let post: RawPost = serde_json::from_value(json!({
            "id": 11,
            "slug": "hello",
            "title": {"rendered": "Hello &amp; welcome"},
            "categories": [3],
            "_embedded": {
                "author": [{"name": "Sam"}],
                "wp:featuredmedia": [{"source_url": "https://cms/a.jpg", "alt_text": "A", "media_details": {"width": 10}}],
                "wp:term": [[{"id": 3, "name": "News", "slug": "news", "taxonomy": "category"}], []]
            }
        }))
        .unwrap();

        assert_eq!(post.embedded.author[0].name, "Sam");
        assert_eq!(post.embedded.featured_media[0].media_details.width, Some(10));
        assert_eq!(post.embedded.terms.len(), 2);
    }

    #[test]
    fn test_post_without_embed() {
        let post: RawPost = serde_json::from_value(json!({"id": 1, "_embedded": null})).unwrap();
        assert!(post.embedded.author.is_empty());
    }
}
