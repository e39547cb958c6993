//! Pure path-to-locale resolution.

use crate::i18n::SupportedCodes;

/// Resolve the active locale from a URL path.
///
/// The first non-empty path segment selects the locale when it belongs to
/// the supported set; anything else (root path, unrecognized code, missing
/// segment) resolves to the default. An unrecognized first segment is left
/// in place as part of the content route, so `/kX/foo` resolves to the
/// default locale with `kX` treated as a page slug.
///
/// # Arguments
/// * `pathname` - URL path beginning with `/`
/// * `supported` - the authoritative supported-code set
///
/// # Returns
/// The resolved locale code. Never fails.
pub fn resolve_locale(pathname: &str, supported: &SupportedCodes) -> String {
    match pathname.split('/').find(|segment| !segment.is_empty()) {
        Some(first) if supported.contains(first) => first.to_string(),
        _ => supported.default_code().to_string(),
    }
}
