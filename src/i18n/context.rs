//! Translation context: per-session wiring of resolver and store.
//!
//! One context is constructed per request/session. It tracks the active
//! locale and its dictionary, and guarantees that a slow in-flight fetch
//! for a previously active locale can never overwrite the dictionary of a
//! locale selected later (last write wins by generation).

use crate::i18n::locale::DEFAULT_LOCALE;
use crate::i18n::registry::LocaleRegistry;
use crate::i18n::resolver::resolve_locale;
use crate::i18n::store::{translate, Dictionary, TranslationStore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::debug;

struct ContextState {
    locale: String,
    dictionary: Arc<Dictionary>,
    loading: bool,
}

/// Per-session translation service.
///
/// `t` is synchronous and callable at any point, including while a fetch is
/// in flight; it falls back to the caller's default (or the key) until the
/// dictionary arrives.
pub struct TranslationContext {
    registry: Arc<LocaleRegistry>,
    store: Arc<TranslationStore>,
    state: RwLock<ContextState>,
    // Bumped on every locale change; stale fetches check it before applying
    generation: AtomicU64,
}

impl TranslationContext {
    pub fn new(registry: Arc<LocaleRegistry>, store: Arc<TranslationStore>) -> Self {
        Self {
            registry,
            store,
            state: RwLock::new(ContextState {
                locale: DEFAULT_LOCALE.to_string(),
                dictionary: Arc::new(Dictionary::default()),
                loading: true,
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// The currently active locale code.
    pub fn locale(&self) -> String {
        self.state.read().unwrap().locale.clone()
    }

    /// Whether a dictionary fetch is still in flight for the active locale.
    pub fn is_loading(&self) -> bool {
        self.state.read().unwrap().loading
    }

    /// Look up a translation in the active dictionary.
    ///
    /// Total and synchronous: while loading, or when the key is missing,
    /// returns `default` (or the key itself) so rendering never blocks on
    /// the CMS.
    pub fn t(&self, key: &str, default: Option<&str>) -> String {
        let dictionary = self.state.read().unwrap().dictionary.clone();
        translate(&dictionary, key, default)
    }

    /// Switch the active locale and load its dictionary.
    ///
    /// Re-entrant: when the locale changes again before this fetch settles,
    /// the stale result is discarded instead of overwriting the newer
    /// locale's dictionary.
    pub async fn set_locale(&self, code: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.write().unwrap();
            state.locale = code.to_string();
            state.loading = true;
        }

        let dictionary = self.store.get_translations(code).await;

        let mut state = self.state.write().unwrap();
        if self.generation.load(Ordering::SeqCst) == generation {
            state.dictionary = dictionary;
            state.loading = false;
        } else {
            debug!("Discarding stale translations for '{}'", code);
        }
    }

    /// Resolve the locale from a URL path against the registry-derived
    /// supported set, then load it. Returns the resolved code.
    pub async fn resolve_and_load(&self, pathname: &str) -> String {
        let supported = self.registry.supported_codes().await;
        let code = resolve_locale(pathname, &supported);
        self.set_locale(&code).await;
        code
    }
}
