//! Locale-aware href building for internal links and the language switcher.
//!
//! The default locale is served unprefixed (`/team`), every other locale
//! gets a leading code segment (`/ka/team`). All three functions are pure.

use crate::i18n::SupportedCodes;

/// Prefix an internal path with the active locale.
///
/// The default locale and non-absolute paths (external or already
/// qualified) pass through unchanged.
pub fn build_localized_href(path: &str, active_locale: &str, default_code: &str) -> String {
    if active_locale == default_code || !path.starts_with('/') {
        return path.to_string();
    }
    format!("/{}{}", active_locale, path)
}

/// Remove a leading supported, non-default locale segment from a path.
///
/// `/ka/team` becomes `/team`; `/team` and `/kX/foo` pass through, since an
/// unrecognized first segment is part of the content route.
pub fn strip_locale_prefix(path: &str, supported: &SupportedCodes) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.first() {
        Some(first) if supported.contains(first) && *first != supported.default_code() => {
            format!("/{}", segments[1..].join("/"))
        }
        _ => path.to_string(),
    }
}

/// Compute the destination of a language switch: strip the current locale
/// prefix, then re-prefix with the new code.
pub fn switch_locale_href(current_path: &str, new_code: &str, supported: &SupportedCodes) -> String {
    let stripped = strip_locale_prefix(current_path, supported);
    build_localized_href(&stripped, new_code, supported.default_code())
}
