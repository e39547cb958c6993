//! Locale data model and the authoritative supported-code set.
//!
//! The set of supported locales normally comes from the Strapi registry
//! endpoint. When that endpoint is unreachable, `SupportedCodes` falls back
//! to the static code list the site shipped with, so path resolution keeps
//! working in degraded mode instead of collapsing every URL to English.

use serde::Deserialize;

/// The locale served when the URL carries no recognizable prefix.
pub const DEFAULT_LOCALE: &str = "en";

/// Static allow-list used only when the locale registry is unavailable.
pub const FALLBACK_CODES: [&str; 3] = ["en", "ka", "ru"];

/// A locale as returned by Strapi's `/api/i18n/locales` endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Locale {
    /// Numeric id assigned by Strapi (absent in some payload variants)
    #[serde(default)]
    pub id: Option<i64>,

    /// Human-readable name (e.g., "English", "Georgian")
    pub name: String,

    /// Locale code (e.g., "en", "ka", "ru")
    pub code: String,

    /// Whether this is the site's default locale
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
}

/// The authoritative set of locale codes for path resolution and href
/// building.
///
/// Built from a registry response when one is available, otherwise from
/// `FALLBACK_CODES`. Exactly one registry locale should carry
/// `isDefault = true`; when zero or several do, the default falls back to
/// `DEFAULT_LOCALE` rather than guessing between candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportedCodes {
    codes: Vec<String>,
    default_code: String,
}

impl SupportedCodes {
    /// Build the supported set from a fetched locale list.
    ///
    /// An empty list (the registry's degraded-mode result) yields the
    /// static fallback set.
    pub fn from_locales(locales: &[Locale]) -> Self {
        if locales.is_empty() {
            return Self::fallback();
        }

        let defaults: Vec<&Locale> = locales.iter().filter(|l| l.is_default).collect();
        let default_code = match defaults.as_slice() {
            [only] => only.code.clone(),
            _ => DEFAULT_LOCALE.to_string(),
        };

        Self {
            codes: locales.iter().map(|l| l.code.clone()).collect(),
            default_code,
        }
    }

    /// The static allow-list, used when the registry is unavailable.
    pub fn fallback() -> Self {
        Self {
            codes: FALLBACK_CODES.iter().map(|c| c.to_string()).collect(),
            default_code: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Check whether a code belongs to the supported set.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    /// The default locale's code.
    pub fn default_code(&self) -> &str {
        &self.default_code
    }

    /// All supported codes, in registry order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }
}

impl Default for SupportedCodes {
    fn default() -> Self {
        Self::fallback()
    }
}
