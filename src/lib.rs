//! Locale resolution and translation layer for a Strapi-backed multilingual
//! website.
//!
//! The crate decides, for every incoming path, which language variant of the
//! site to serve: it resolves the active locale from the URL, fetches and
//! caches the supported-locale list and per-locale translation dictionaries
//! from the Strapi content API, and exposes a total `t(key, default)` lookup
//! plus locale-aware href building for internal links and the language
//! switcher.
//!
//! All public operations degrade instead of failing: an unreachable content
//! source yields an empty locale list and key-as-text translations, never a
//! broken page.

pub mod config;
pub mod i18n;
pub mod retry;
pub mod server;
