//! i18n - Internationalization Module
//!
//! Provides simple translation functions using HashMap-based lookups.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Supported locales
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub enum Locale {
    /// English (US)
    #[default]
    #[serde(rename = "en")]
    EnUS,
    /// Spanish (Spain)
    #[serde(rename = "es")]
    EsES,
}

impl Locale {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::EnUS => "English",
            Locale::EsES => "Español",
        }
    }

    /// Resolve a language tag such as `es`, `es-ES` or `en_US`.
    ///
    /// Unknown languages fall back to English.
    pub fn from_tag(tag: &str) -> Self {
        let lang = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match lang.as_str() {
            "es" => Locale::EsES,
            _ => Locale::EnUS,
        }
    }

    /// Detect the user's locale from the system settings
    pub fn detect() -> Self {
        Self::from_tag(&locale_config::Locale::current().to_string())
    }

    /// Thousands and decimal separators
    pub fn separators(&self) -> (char, char) {
        match self {
            Locale::EnUS => (',', '.'),
            Locale::EsES => ('.', ','),
        }
    }
}

/// Translation resources
static TRANSLATIONS: OnceLock<HashMap<&'static str, (&'static str, &'static str)>> =
    OnceLock::new();

/// Initialize translations (key -> (en, es))
fn init_translations() -> HashMap<&'static str, (&'static str, &'static str)> {
    let mut map = HashMap::new();

    // Cell values
    map.insert("bool-yes", ("Yes", "Sí"));
    map.insert("bool-no", ("No", "No"));

    // Toolbar
    map.insert("toolbar-search", ("Search...", "Buscar..."));
    map.insert("toolbar-filters", ("Filters", "Filtros"));
    map.insert("toolbar-columns", ("Columns", "Columnas"));
    map.insert("toolbar-export", ("Export", "Exportar"));

    // Table
    map.insert("table-no-data", ("No data found", "No se encontraron datos"));
    map.insert("table-loading", ("Loading...", "Cargando..."));
    map.insert("table-error", ("Error loading data", "Error al cargar los datos"));
    map.insert("table-totals", ("Totals", "Totales"));

    // Pagination
    map.insert("page-show", ("Show", "Mostrar"));
    map.insert("page-records", ("records", "registros"));
    map.insert("page-of", ("of", "de"));
    map.insert("page-prev", ("Previous", "Anterior"));
    map.insert("page-next", ("Next", "Siguiente"));

    map
}

/// Get translations
fn translations() -> &'static HashMap<&'static str, (&'static str, &'static str)> {
    TRANSLATIONS.get_or_init(init_translations)
}

/// Translate a key
pub fn t(locale: Locale, key: &str) -> Cow<'static, str> {
    if let Some(&(en, es)) = translations().get(key) {
        match locale {
            Locale::EnUS => Cow::Borrowed(en),
            Locale::EsES => Cow::Borrowed(es),
        }
    } else {
        // Fallback: return the key itself
        Cow::Owned(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_known_key() {
        assert_eq!(t(Locale::EsES, "toolbar-search"), "Buscar...");
        assert_eq!(t(Locale::EnUS, "page-next"), "Next");
    }

    #[test]
    fn test_translate_unknown_key_falls_back() {
        assert_eq!(t(Locale::EsES, "nope"), "nope");
    }

    #[test]
    fn test_from_tag() {
        assert_eq!(Locale::from_tag("es-ES"), Locale::EsES);
        assert_eq!(Locale::from_tag("es_MX"), Locale::EsES);
        assert_eq!(Locale::from_tag("en-US"), Locale::EnUS);
        assert_eq!(Locale::from_tag("fr"), Locale::EnUS);
        assert_eq!(Locale::from_tag(""), Locale::EnUS);
    }
}
