//! Localisation seam for user-facing text.
//!
//! Text is looked up by its English source string. Implementations fall back
//! to the source string when no translation exists.

use std::collections::HashMap;

/// Translates an English source string into the caller's language.
pub trait Translate: Send + Sync {
    fn translate(&self, text: &str) -> String;
}

/// Returns every string unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Untranslated;

impl Translate for Untranslated {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Map-backed translations for a single language.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslations {
    entries: HashMap<String, String>,
}

impl CatalogTranslations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the translation of `source`.
    pub fn with_entry(mut self, source: impl Into<String>, translated: impl Into<String>) -> Self {
        self.entries.insert(source.into(), translated.into());
        self
    }
}

impl FromIterator<(String, String)> for CatalogTranslations {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Translate for CatalogTranslations {
    fn translate(&self, text: &str) -> String {
        self.entries
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}
