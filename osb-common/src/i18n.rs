//! Translation catalog
//!
//! The catalog is a `{language: {key: text}}` document loaded once at
//! startup. The active language is chosen per request and handed to the
//! renderer as a [`Translator`]; the catalog itself is immutable.

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::Result;

/// Table used when neither the requested nor the default language has one
pub const FALLBACK_LANGUAGE: &str = "da";

/// Immutable translation catalog
#[derive(Debug, Clone)]
pub struct Translations {
    tables: HashMap<String, HashMap<String, String>>,
    default_language: String,
}

impl Translations {
    /// Build a catalog from parsed tables
    pub fn new(
        tables: HashMap<String, HashMap<String, String>>,
        default_language: impl Into<String>,
    ) -> Self {
        Self {
            tables,
            default_language: default_language.into(),
        }
    }

    /// Catalog used when no translations file is available
    pub fn builtin(default_language: impl Into<String>) -> Self {
        let mut tables = HashMap::new();
        tables.insert(
            "da".to_string(),
            HashMap::from([("Vores Proces".to_string(), "Vores Proces".to_string())]),
        );
        tables.insert(
            "en".to_string(),
            HashMap::from([("Vores Proces".to_string(), "Our Process".to_string())]),
        );
        Self::new(tables, default_language)
    }

    /// Parse a catalog from JSON text
    pub fn from_json_str(content: &str, default_language: impl Into<String>) -> Result<Self> {
        let tables: HashMap<String, HashMap<String, String>> = serde_json::from_str(content)?;
        Ok(Self::new(tables, default_language))
    }

    /// Load a catalog, falling back to the built-in one
    ///
    /// A missing file is silent; an unreadable or malformed file is logged.
    pub fn load_or_builtin(path: &Path, default_language: &str) -> Self {
        if !path.exists() {
            info!(
                "Translations file {} not found, using built-in catalog",
                path.display()
            );
            return Self::builtin(default_language);
        }

        let loaded = std::fs::read_to_string(path)
            .map_err(crate::Error::from)
            .and_then(|content| Self::from_json_str(&content, default_language));

        match loaded {
            Ok(catalog) => {
                info!(
                    "Loaded {} translation table(s) from {}",
                    catalog.tables.len(),
                    path.display()
                );
                catalog
            }
            Err(e) => {
                warn!("Could not read translations {}: {}", path.display(), e);
                Self::builtin(default_language)
            }
        }
    }

    /// Language used when a request does not choose one
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Languages with a table, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }

    /// Translate `key` into `lang`
    ///
    /// Unknown languages use the default language's table, then the
    /// [`FALLBACK_LANGUAGE`] table; unknown keys are returned unchanged.
    pub fn translate<'a>(&'a self, lang: &str, key: &'a str) -> &'a str {
        self.tables
            .get(lang)
            .or_else(|| self.tables.get(&self.default_language))
            .or_else(|| self.tables.get(FALLBACK_LANGUAGE))
            .and_then(|table| table.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// Bind the catalog to one request's language
    pub fn translator<'a>(&'a self, lang: &'a str) -> Translator<'a> {
        Translator { catalog: self, lang }
    }
}

/// Catalog bound to a single request's language
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    catalog: &'a Translations,
    lang: &'a str,
}

impl<'a> Translator<'a> {
    /// Active language code
    pub fn lang(&self) -> &'a str {
        self.lang
    }

    /// Translate a key
    pub fn t(&self, key: &'a str) -> &'a str {
        self.catalog.translate(self.lang, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Translations::builtin("da");
        assert_eq!(catalog.translate("en", "Vores Proces"), "Our Process");
        assert_eq!(catalog.translate("da", "Vores Proces"), "Vores Proces");
        assert_eq!(catalog.languages(), vec!["da", "en"]);
    }

    #[test]
    fn test_unknown_language_uses_fallback_table() {
        let catalog = Translations::from_json_str(
            r#"{"da": {"Spillere": "Spillere"}, "en": {"Spillere": "Players"}}"#,
            "da",
        )
        .unwrap();
        assert_eq!(catalog.translate("fr", "Spillere"), "Spillere");
    }

    #[test]
    fn test_unknown_language_uses_configured_default() {
        let catalog =
            Translations::from_json_str(r#"{"da": {"k": "dansk"}, "en": {"k": "english"}}"#, "en")
                .unwrap();
        assert_eq!(catalog.translate("fr", "k"), "english");
        assert_eq!(catalog.translator("fr").t("k"), "english");

        // Default without a table of its own
        let catalog = Translations::from_json_str(r#"{"da": {"k": "dansk"}}"#, "sv").unwrap();
        assert_eq!(catalog.translate("fr", "k"), "dansk");
    }

    #[test]
    fn test_unknown_key_returned_verbatim() {
        let catalog = Translations::builtin("da");
        assert_eq!(catalog.translate("en", "Nope"), "Nope");
        assert_eq!(catalog.translator("en").t("Nope"), "Nope");
    }
}
