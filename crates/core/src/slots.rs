//! Route identifiers for service and application detail pages.
//!
//! The services and applications pages hold their entries as a flexible
//! content list. An entry is matched to a route slug in this order:
//!
//! 1. the entry's `key` field equals the slug;
//! 2. the slug has a fixed position in the table below and an entry exists at
//!    that position;
//! 3. the slug, with punctuation removed, is a substring of the entry title,
//!    or every word of the title is a word of the slug.
//!
//! The fixed positions mirror the authoring order agreed with the content
//! editors: the first service entry is always App Development and the second
//! Web Development; the first application is the CRM platform and the second
//! HR management. Reordering entries in WordPress without filling in `key`
//! breaks these routes.

use crate::acf::{ApplicationBlock, ServiceBlock};

/// One known route identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub slug: &'static str,
    /// Fixed position of the entry in the CMS list, if any.
    pub index: Option<usize>,
}

/// How an entry was located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotMatch {
    Key,
    Index,
    Title,
}

/// Items that can be looked up by slot.
pub trait Keyed {
    fn key(&self) -> &str;
    fn title(&self) -> &str;
}

impl Keyed for ServiceBlock {
    fn key(&self) -> &str {
        &self.key
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl Keyed for ApplicationBlock {
    fn key(&self) -> &str {
        &self.key
    }

    fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SlotTable {
    slots: &'static [Slot],
}

pub const SERVICE_SLOTS: SlotTable = SlotTable {
    slots: &[
        Slot { slug: "app-development", index: Some(0) },
        Slot { slug: "web-development", index: Some(1) },
        Slot { slug: "ui-ux-design", index: None },
        Slot { slug: "cloud-solutions", index: None },
        Slot { slug: "ai-integration", index: None },
        Slot { slug: "digital-marketing", index: None },
    ],
};

pub const APPLICATION_SLOTS: SlotTable = SlotTable {
    slots: &[
        Slot { slug: "crm-platform", index: Some(0) },
        Slot { slug: "hr-management", index: Some(1) },
        Slot { slug: "inventory-management", index: None },
        Slot { slug: "learning-management", index: None },
        Slot { slug: "ecommerce-platform", index: None },
    ],
};

impl SlotTable {
    pub fn slots(&self) -> &'static [Slot] {
        self.slots
    }

    pub fn get(&self, slug: &str) -> Option<&'static Slot> {
        self.slots.iter().find(|slot| slot.slug == slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.get(slug).is_some()
    }

    /// Finds the position of the entry serving `slug`.
    pub fn locate<T: Keyed>(&self, slug: &str, items: &[&T]) -> Option<(usize, SlotMatch)> {
        if let Some(pos) = items.iter().position(|item| !item.key().is_empty() && item.key() == slug) {
            return Some((pos, SlotMatch::Key));
        }

        if let Some(index) = self.get(slug).and_then(|slot| slot.index)
            && index < items.len()
        {
            return Some((index, SlotMatch::Index));
        }

        items
            .iter()
            .position(|item| title_matches(slug, item.title()))
            .map(|pos| (pos, SlotMatch::Title))
    }

    /// Reverse lookup: the route slug for the entry at `position`.
    pub fn slug_for<T: Keyed>(&self, position: usize, item: &T) -> Option<String> {
        if !item.key().is_empty() {
            return Some(item.key().to_string());
        }
        if let Some(slot) = self.slots.iter().find(|slot| slot.index == Some(position)) {
            return Some(slot.slug.to_string());
        }
        self.slots
            .iter()
            .filter(|slot| slot.index.is_none())
            .find(|slot| title_matches(slot.slug, item.title()))
            .map(|slot| slot.slug.to_string())
    }
}

/// Lowercased alphanumerics only: "UI/UX Design" becomes "uiuxdesign".
fn compact(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn words(value: &str) -> Vec<String> {
    value
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub(crate) fn title_matches(slug: &str, title: &str) -> bool {
    let compact_slug = compact(slug);
    let compact_title = compact(title);
    if compact_slug.is_empty() || compact_title.is_empty() {
        return false;
    }
    if compact_title.contains(&compact_slug) {
        return true;
    }
    let slug_words = words(slug);
    words(title).iter().all(|word| slug_words.contains(word))
}
