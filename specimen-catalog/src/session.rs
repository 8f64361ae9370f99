//! Process-lifetime handle around an optional catalog.

use std::sync::Arc;

use specimen_config::CatalogLocator;

use crate::store::{Catalog, Font, Fontset};

/// Holds the catalog for a font manager that must keep working without one.
///
/// A failed load leaves the handle empty and every lookup returns `None`.
/// The loaded catalog is immutable and can be handed to other threads via
/// [`FontCatalog::shared`].
#[derive(Debug, Default)]
pub struct FontCatalog {
    catalog: Option<Arc<Catalog>>,
}

impl FontCatalog {
    /// An empty handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the catalog found by `locator`, replacing any loaded one.
    ///
    /// Returns whether a catalog is now available.
    pub fn initialize(&mut self, locator: &dyn CatalogLocator) -> bool {
        self.terminate();
        match Catalog::init(locator) {
            Ok(catalog) => {
                self.catalog = Some(Arc::new(catalog));
                true
            }
            Err(e) if e.is_not_found() => {
                log::info!("Font catalog unavailable: {}", e);
                false
            }
            Err(e) => {
                log::warn!("Font catalog could not be loaded: {}", e);
                false
            }
        }
    }

    /// Wrap an already-built catalog.
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Some(Arc::new(catalog)),
        }
    }

    /// Release the catalog. Does nothing when none is loaded.
    pub fn terminate(&mut self) {
        if let Some(catalog) = self.catalog.take() {
            match Arc::try_unwrap(catalog) {
                Ok(catalog) => catalog.teardown(),
                Err(_) => log::debug!("Font catalog still shared; released on last drop"),
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_deref()
    }

    /// Shared handle for readers on other threads.
    pub fn shared(&self) -> Option<Arc<Catalog>> {
        self.catalog.clone()
    }

    pub fn search_name(&self, name: &str) -> Option<Font<'_>> {
        self.catalog()?.search_by_name(name)
    }

    pub fn search_family(&self, name: &str) -> Option<Fontset<'_>> {
        self.catalog()?.search_by_family(name)
    }

    /// Path of `font` for diagnostics, `[unknown]` when absent.
    pub fn font_description(font: Option<&Font<'_>>) -> String {
        font.map_or_else(|| "[unknown]".to_string(), |f| f.path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specimen_config::FixedLocator;

    #[test]
    fn test_missing_catalog_leaves_handle_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut fonts = FontCatalog::new();
        assert!(!fonts.initialize(&FixedLocator::new(dir.path().join("absent.json"))));
        assert!(!fonts.is_loaded());
        assert!(fonts.search_name("Arial").is_none());
        assert!(fonts.search_family("Arial").is_none());
    }

    #[test]
    fn test_unreadable_catalog_leaves_handle_empty() {
        // A directory exists but cannot be read as a document.
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, crate::CatalogError::Io { .. }));
        assert!(!err.is_not_found());

        let mut fonts = FontCatalog::new();
        assert!(!fonts.initialize(&FixedLocator::new(dir.path())));
        assert!(!fonts.is_loaded());
        assert!(fonts.search_name("Arial").is_none());
    }

    #[test]
    fn test_malformed_catalog_leaves_handle_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fontdb.json");
        std::fs::write(&path, "{\"file\": 3}").unwrap();
        let mut fonts = FontCatalog::new();
        assert!(!fonts.initialize(&FixedLocator::new(path)));
        assert!(!fonts.is_loaded());
    }

    #[test]
    fn test_terminate_is_idempotent() {
        let mut fonts = FontCatalog::new();
        fonts.terminate();
        fonts.terminate();

        let catalog = Catalog::from_json(r#"{"file": [{"path": "A.ttf"}]}"#).unwrap();
        let mut fonts = FontCatalog::from_catalog(catalog);
        assert!(fonts.is_loaded());
        fonts.terminate();
        fonts.terminate();
        assert!(!fonts.is_loaded());
    }

    #[test]
    fn test_shared_catalog_outlives_terminate() {
        let catalog = Catalog::from_json(
            r#"{
                "file": [{"path": "A.ttf"}],
                "link": [{"name": "Arial", "inst": [0]}],
                "link_hash": [{"key": 897, "vals": [0]}]
            }"#,
        )
        .unwrap();
        let mut fonts = FontCatalog::from_catalog(catalog);
        let shared = fonts.shared().unwrap();
        fonts.terminate();

        let reader = std::thread::spawn(move || {
            shared
                .search_by_name("Arial")
                .map(|f| f.path().to_string())
        });
        assert_eq!(reader.join().unwrap().as_deref(), Some("A.ttf"));
    }

    #[test]
    fn test_font_description() {
        assert_eq!(FontCatalog::font_description(None), "[unknown]");
        let catalog = Catalog::from_json(r#"{"file": [{"path": "A.ttf"}]}"#).unwrap();
        let font = catalog.font_at(0);
        assert_eq!(FontCatalog::font_description(font.as_ref()), "A.ttf");
    }
}
