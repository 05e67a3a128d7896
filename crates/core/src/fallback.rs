//! Static fallback content.
//!
//! Hand-authored view models used when the CMS is unreachable, has no entry
//! for a route, or the entry lacks its header block. The built-in table is
//! compiled from `data/fallback.json`; deployments can point at their own
//! file with [`FallbackTable::from_path`].

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::view::{ApplicationViewModel, HomeViewModel, ServiceViewModel};
use crate::{Result, VitrineError};

const BUILTIN: &str = include_str!("../data/fallback.json");

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FallbackTable {
    home: Option<HomeViewModel>,
    services: HashMap<String, ServiceViewModel>,
    applications: HashMap<String, ApplicationViewModel>,
}

impl FallbackTable {
    /// An empty table: every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let mut table: Self = serde_json::from_str(json).map_err(|e| VitrineError::Fallback(e.to_string()))?;
        for (slug, service) in table.services.iter_mut() {
            if service.slug.is_empty() {
                service.slug = slug.clone();
            }
        }
        for (slug, application) in table.applications.iter_mut() {
            if application.slug.is_empty() {
                application.slug = slug.clone();
            }
        }
        Ok(table)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| VitrineError::Fallback(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn with_home(mut self, home: HomeViewModel) -> Self {
        self.home = Some(home);
        self
    }

    pub fn with_service(mut self, slug: &str, mut service: ServiceViewModel) -> Self {
        service.slug = slug.to_string();
        self.services.insert(slug.to_string(), service);
        self
    }

    pub fn with_application(mut self, slug: &str, mut application: ApplicationViewModel) -> Self {
        application.slug = slug.to_string();
        self.applications.insert(slug.to_string(), application);
        self
    }

    pub fn home(&self) -> Option<&HomeViewModel> {
        self.home.as_ref()
    }

    pub fn service(&self, slug: &str) -> Option<&ServiceViewModel> {
        self.services.get(slug)
    }

    pub fn application(&self, slug: &str) -> Option<&ApplicationViewModel> {
        self.applications.get(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::{APPLICATION_SLOTS, SERVICE_SLOTS};
    use std::io::Write;

    #[test]
    fn test_builtin_table_loads() {
        let table = FallbackTable::builtin().unwrap();
        assert!(table.home().is_some());
        assert!(!table.home().unwrap().hero.title.is_empty());
    }

    #[test]
    fn test_builtin_covers_every_known_slug() {
        let table = FallbackTable::builtin().unwrap();
        for slot in SERVICE_SLOTS.slots() {
            let service = table.service(slot.slug).unwrap_or_else(|| panic!("missing service {}", slot.slug));
            assert_eq!(service.slug, slot.slug);
            assert!(!service.hero.title.is_empty());
        }
        for slot in APPLICATION_SLOTS.slots() {
            let application =
                table.application(slot.slug).unwrap_or_else(|| panic!("missing application {}", slot.slug));
            assert_eq!(application.slug, slot.slug);
        }
    }

    #[test]
    fn test_empty_table_misses() {
        let table = FallbackTable::empty();
        assert!(table.home().is_none());
        assert!(table.service("app-development").is_none());
    }

    #[test]
    fn test_builder_sets_slug() {
        let table = FallbackTable::empty().with_service("web-development", ServiceViewModel::default());
        assert_eq!(table.service("web-development").unwrap().slug, "web-development");
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"services": {{"cloud-solutions": {{"hero": {{"title": "Cloud"}}}}}}}}"#).unwrap();

        let table = FallbackTable::from_path(file.path()).unwrap();
        assert_eq!(table.service("cloud-solutions").unwrap().hero.title, "Cloud");
        assert!(table.home().is_none());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(FallbackTable::from_json("{"), Err(VitrineError::Fallback(_))));
    }
}
