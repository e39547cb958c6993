//! Translation store: per-locale dictionaries and dotted-path lookup.
//!
//! Dictionaries come from the Strapi "translation" single type, one
//! document per locale. The `translations` field arrives either as a
//! JSON-encoded string or as an already-nested object depending on how the
//! document was authored; `normalize_translations` accepts both. Lookup is
//! total: a missing key renders as the caller's default (or the key
//! itself), never as an error.

use crate::retry::{is_retryable_error, with_retry_if, RetryConfig};
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

/// A nested translation dictionary for one locale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary(serde_json::Map<String, Value>);

impl Dictionary {
    /// Wrap a JSON value; anything that is not an object becomes the empty
    /// dictionary.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Look up a dotted-path key in a dictionary.
///
/// Splits `key` on `.` and walks the nested maps one segment at a time.
/// Any missing segment, non-object intermediate, or non-string terminal
/// falls back to `default` when supplied, else to the raw key, so the UI
/// always has legible text to render.
///
/// # Returns
/// The translated string, or the fallback. Never panics.
pub fn translate(dict: &Dictionary, key: &str, default: Option<&str>) -> String {
    let fallback = || default.unwrap_or(key).to_string();

    let mut current: Option<&Value> = None;
    for segment in key.split('.') {
        let map = match current {
            None => &dict.0,
            Some(Value::Object(map)) => map,
            Some(_) => return fallback(),
        };
        match map.get(segment) {
            Some(value) => current = Some(value),
            None => return fallback(),
        }
    }

    match current {
        Some(Value::String(text)) => text.clone(),
        _ => fallback(),
    }
}

/// Unwrap a translation document body into a dictionary.
///
/// Accepts both the enveloped shape `{ "data": { "translations": ... } }`
/// and an already-unwrapped `{ "translations": ... }`, and normalizes the
/// `translations` field whether it is a JSON-encoded string or a nested
/// object. Anything else yields the empty dictionary.
fn normalize_translations(body: &Value) -> Dictionary {
    let translations = body
        .get("data")
        .and_then(|data| data.get("translations"))
        .or_else(|| body.get("translations"));

    match translations {
        Some(Value::String(encoded)) => serde_json::from_str::<Value>(encoded)
            .map(Dictionary::from_value)
            .unwrap_or_default(),
        Some(value @ Value::Object(_)) => Dictionary::from_value(value.clone()),
        _ => Dictionary::default(),
    }
}

/// Client for the Strapi translation single type, with a per-locale cache.
pub struct TranslationStore {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    cache: Mutex<HashMap<String, Arc<Dictionary>>>,
}

impl TranslationStore {
    /// Create a store against the given Strapi base URL.
    pub fn new(client: reqwest::Client, base_url: String, timeout: Duration) -> Self {
        Self {
            client,
            base_url,
            timeout,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Get the translation dictionary for a locale, from cache when
    /// available.
    ///
    /// Fetch or parse failures yield the empty dictionary and are not
    /// cached, so the next call retries against the CMS.
    pub async fn get_translations(&self, locale: &str) -> Arc<Dictionary> {
        if let Some(dict) = self.cache.lock().unwrap().get(locale) {
            debug!("Translations for '{}' served from cache", locale);
            return dict.clone();
        }

        match self.fetch_translations(locale).await {
            Ok(dict) => {
                let dict = Arc::new(dict);
                self.cache
                    .lock()
                    .unwrap()
                    .insert(locale.to_string(), dict.clone());
                dict
            }
            Err(e) => {
                warn!("Failed to fetch translations for '{}': {:#}", locale, e);
                Arc::new(Dictionary::default())
            }
        }
    }

    /// Drop the cached dictionary for a locale. A locale switch reloads
    /// rather than merges.
    pub fn invalidate(&self, locale: &str) {
        self.cache.lock().unwrap().remove(locale);
    }

    async fn fetch_translations(&self, locale: &str) -> Result<Dictionary> {
        let url = format!("{}/api/translation", self.base_url);

        let body = with_retry_if(
            &RetryConfig::cms_fetch(),
            &format!("Translation fetch ({})", locale),
            || async {
                let response = self
                    .client
                    .get(&url)
                    .query(&[("locale", locale)])
                    .timeout(self.timeout)
                    .send()
                    .await
                    .context("Failed to send request to Strapi")?;

                if !response.status().is_success() {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    anyhow::bail!("Strapi endpoint error ({}): {}", status, body);
                }

                response
                    .json::<Value>()
                    .await
                    .context("Failed to parse translation response")
            },
            is_retryable_error,
        )
        .await?;

        let dict = normalize_translations(&body);
        debug!(
            "Fetched translations for '{}' ({})",
            locale,
            if dict.is_empty() { "empty" } else { "ok" }
        );
        Ok(dict)
    }
}
