//! Integration tests for the locale resolution and translation layer.
//!
//! These tests verify the full flow (URL path to resolved locale to
//! fetched dictionary to rendered strings) against a mocked Strapi
//! content source, including the degraded modes the site must survive.

use std::sync::Arc;
use std::time::Duration;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use strapi_locale::config::Config;
use strapi_locale::i18n::{
    resolve_locale, switch_locale_href, LocaleRegistry, SupportedCodes, TranslationContext,
    TranslationStore,
};
use strapi_locale::server::{build_router, AppState};

// ==================== Test Helpers ====================

fn test_config(base_url: &str) -> Config {
    Config {
        strapi_base_url: base_url.to_string(),
        locale_fetch_timeout: Duration::from_secs(5),
        translation_fetch_timeout: Duration::from_secs(5),
        locale_cache_ttl: Duration::from_secs(60),
        port: 0,
    }
}

fn test_registry(base_url: &str) -> Arc<LocaleRegistry> {
    Arc::new(LocaleRegistry::new(
        reqwest::Client::new(),
        base_url.to_string(),
        Duration::from_secs(60),
        Duration::from_secs(5),
    ))
}

fn test_store(base_url: &str) -> Arc<TranslationStore> {
    Arc::new(TranslationStore::new(
        reqwest::Client::new(),
        base_url.to_string(),
        Duration::from_secs(5),
    ))
}

async fn mount_locales(mock_server: &MockServer) {
    let body = serde_json::json!([
        {"id": 1, "name": "English (en)", "code": "en", "isDefault": true},
        {"id": 2, "name": "Georgian (ka)", "code": "ka", "isDefault": false},
        {"id": 3, "name": "Russian (ru)", "code": "ru", "isDefault": false}
    ]);
    Mock::given(method("GET"))
        .and(path("/api/i18n/locales"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}

async fn mount_translations(mock_server: &MockServer, locale: &str, title: &str) {
    let body = serde_json::json!({
        "data": {
            "translations": {"common": {"siteTitle": title, "menu": "Menu"}},
            "locale": locale
        }
    });
    Mock::given(method("GET"))
        .and(path("/api/translation"))
        .and(query_param("locale", locale))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}

// ==================== Full Flow Tests ====================

#[tokio::test]
async fn test_path_to_translated_string_flow() {
    let mock_server = MockServer::start().await;
    mount_locales(&mock_server).await;
    mount_translations(&mock_server, "ka", "მთავარი").await;

    let registry = test_registry(&mock_server.uri());
    let store = test_store(&mock_server.uri());

    // Resolve the locale from the incoming path
    let supported = registry.supported_codes().await;
    let locale = resolve_locale("/ka/team", &supported);
    assert_eq!(locale, "ka");

    // Load the dictionary and render
    let context = TranslationContext::new(registry, store);
    context.set_locale(&locale).await;

    assert_eq!(context.t("common.siteTitle", Some("Home")), "მთავარი");
    assert_eq!(context.t("common.missing", Some("Fallback")), "Fallback");
}

#[tokio::test]
async fn test_default_locale_flow_without_prefix() {
    let mock_server = MockServer::start().await;
    mount_locales(&mock_server).await;
    mount_translations(&mock_server, "en", "Home").await;

    let registry = test_registry(&mock_server.uri());
    let store = test_store(&mock_server.uri());

    let context = TranslationContext::new(registry, store);
    let locale = context.resolve_and_load("/team").await;

    assert_eq!(locale, "en");
    assert_eq!(context.t("common.siteTitle", None), "Home");
}

#[tokio::test]
async fn test_language_switcher_flow() {
    let mock_server = MockServer::start().await;
    mount_locales(&mock_server).await;

    let registry = test_registry(&mock_server.uri());

    let locales = registry.get_available_locales().await;
    let supported = registry.supported_codes().await;

    // Every registry locale gets a switch target from the current page
    let current_path = "/ka/team";
    let hrefs: Vec<String> = locales
        .iter()
        .map(|l| switch_locale_href(current_path, &l.code, &supported))
        .collect();

    assert_eq!(hrefs, vec!["/team", "/ka/team", "/ru/team"]);
}

// ==================== Degraded Mode Tests ====================

#[tokio::test]
async fn test_registry_outage_degrades_to_fallback_codes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/i18n/locales"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let registry = test_registry(&mock_server.uri());

    // The switcher has nothing to render
    let locales = registry.get_available_locales().await;
    assert!(locales.is_empty());

    // But path resolution still works against the shipped fallback list
    let supported = registry.supported_codes().await;
    assert_eq!(supported, SupportedCodes::fallback());
    assert_eq!(resolve_locale("/ka/team", &supported), "ka");
}

#[tokio::test]
async fn test_full_cms_outage_still_renders_defaults() {
    // Nothing is listening at all
    let registry = test_registry("http://127.0.0.1:9");
    let store = test_store("http://127.0.0.1:9");

    let context = TranslationContext::new(registry, store);
    let locale = context.resolve_and_load("/ka/team").await;

    assert_eq!(locale, "ka");
    assert!(!context.is_loading());
    assert_eq!(context.t("common.siteTitle", Some("Home")), "Home");
    assert_eq!(context.t("common.menu", None), "common.menu");
}

// ==================== Server Tests ====================

async fn spawn_app(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    let router = build_router(state);

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Server failed");
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_healthz_endpoint() {
    let state = AppState::new(Arc::new(test_config("http://127.0.0.1:9")));
    let app_url = spawn_app(state).await;

    let response = reqwest::get(format!("{}/healthz", app_url))
        .await
        .expect("Request should succeed");

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.expect("Body"), "ok");
}

#[tokio::test]
async fn test_localized_page_endpoint() {
    let mock_server = MockServer::start().await;
    mount_locales(&mock_server).await;
    mount_translations(&mock_server, "ka", "მთავარი").await;

    let state = AppState::new(Arc::new(test_config(&mock_server.uri())));
    let app_url = spawn_app(state).await;

    let response = reqwest::get(format!("{}/ka/team", app_url))
        .await
        .expect("Request should succeed");
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("JSON body");

    assert_eq!(body["locale"], "ka");
    assert_eq!(body["isDefault"], false);
    assert_eq!(body["title"], "მთავარი");

    let switcher = body["switcher"].as_array().expect("switcher array");
    assert_eq!(switcher.len(), 3);
    assert_eq!(switcher[0]["code"], "en");
    assert_eq!(switcher[0]["label"], "EN");
    assert_eq!(switcher[0]["href"], "/team");
    assert_eq!(switcher[0]["active"], false);
    assert_eq!(switcher[1]["code"], "ka");
    assert_eq!(switcher[1]["href"], "/ka/team");
    assert_eq!(switcher[1]["active"], true);
}

#[tokio::test]
async fn test_localized_page_degraded_switcher_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/i18n/locales"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/translation"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let state = AppState::new(Arc::new(test_config(&mock_server.uri())));
    let app_url = spawn_app(state).await;

    let response = reqwest::get(format!("{}/team", app_url))
        .await
        .expect("Request should succeed");
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("JSON body");

    // Degraded, not broken: default strings and zero switcher options
    assert_eq!(body["locale"], "en");
    assert_eq!(body["title"], "Home");
    assert_eq!(body["switcher"].as_array().expect("array").len(), 0);
}

// ==================== Cache Behavior Across Components ====================

#[tokio::test]
async fn test_locale_list_fetched_once_per_ttl_across_requests() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!([
        {"id": 1, "name": "English (en)", "code": "en", "isDefault": true}
    ]);
    Mock::given(method("GET"))
        .and(path("/api/i18n/locales"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_translations(&mock_server, "en", "Home").await;

    let registry = test_registry(&mock_server.uri());
    let store = test_store(&mock_server.uri());

    // Several page loads share the registry cache
    for path in ["/", "/team", "/contact"] {
        let context = TranslationContext::new(registry.clone(), store.clone());
        let locale = context.resolve_and_load(path).await;
        assert_eq!(locale, "en");
    }
}
