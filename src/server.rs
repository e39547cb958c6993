use crate::config::Config;
use crate::i18n::{switch_locale_href, LocaleRegistry, TranslationContext, TranslationStore};
use axum::extract::State;
use axum::http::Uri;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state for the localized-content server.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<LocaleRegistry>,
    pub store: Arc<TranslationStore>,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        let client = reqwest::Client::new();
        let registry = Arc::new(LocaleRegistry::new(
            client.clone(),
            config.strapi_base_url.clone(),
            config.locale_cache_ttl,
            config.locale_fetch_timeout,
        ));
        let store = Arc::new(TranslationStore::new(
            client,
            config.strapi_base_url.clone(),
            config.translation_fetch_timeout,
        ));
        Self {
            config,
            registry,
            store,
        }
    }
}

/// Build the router: a health probe plus a catch-all localized page route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .fallback(get(localized_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Serve the localized page skeleton for any site path.
///
/// Resolves the locale from the path, loads that locale's dictionary, and
/// returns the strings and language-switcher links a rendering layer needs.
async fn localized_page(State(state): State<AppState>, uri: Uri) -> Json<Value> {
    let pathname = uri.path();

    let supported = state.registry.supported_codes().await;
    let locales = state.registry.get_available_locales().await;

    let context = TranslationContext::new(state.registry.clone(), state.store.clone());
    let locale = context.resolve_and_load(pathname).await;

    info!("Serving '{}' as locale '{}'", pathname, locale);

    // One switcher entry per registry locale; zero entries in degraded mode
    let switcher: Vec<Value> = locales
        .iter()
        .map(|l| {
            json!({
                "code": l.code,
                "label": l.code.to_uppercase(),
                "name": l.name,
                "href": switch_locale_href(pathname, &l.code, &supported),
                "active": l.code == locale,
            })
        })
        .collect();

    Json(json!({
        "path": pathname,
        "locale": locale,
        "isDefault": locale == supported.default_code(),
        "title": context.t("common.siteTitle", Some("Home")),
        "menu": context.t("common.menu", Some("Menu")),
        "switcher": switcher,
    }))
}
