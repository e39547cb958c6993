//! Internationalization (i18n) module for the multilingual site.
//!
//! This module contains the full locale pipeline: resolving the active
//! locale from a URL path, fetching and caching the supported-locale list
//! and per-locale translation dictionaries from Strapi, and building
//! locale-prefixed hrefs for internal navigation.
//!
//! # Architecture
//!
//! - `locale`: Locale data model and the authoritative supported-code set
//! - `registry`: Cached fetch of the supported-locale list from Strapi
//! - `resolver`: Pure path-to-locale resolution
//! - `store`: Per-locale translation dictionaries and dotted-path lookup
//! - `nav`: Locale-aware href building for links and the language switcher
//! - `context`: Per-session service tying resolver and store together
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{resolve_locale, LocaleRegistry, TranslationContext};
//!
//! let supported = registry.supported_codes().await;
//! let locale = resolve_locale("/ka/team", &supported); // "ka"
//!
//! let context = TranslationContext::new(registry, store);
//! context.set_locale(&locale).await;
//! let label = context.t("common.filterBy", Some("Filter by"));
//! ```

mod context;
mod locale;
mod nav;
mod registry;
mod resolver;
mod store;

pub use context::TranslationContext;
pub use locale::{Locale, SupportedCodes, DEFAULT_LOCALE, FALLBACK_CODES};
pub use nav::{build_localized_href, strip_locale_prefix, switch_locale_href};
pub use registry::LocaleRegistry;
pub use resolver::resolve_locale;
pub use store::{translate, Dictionary, TranslationStore};
