//! Locale registry: cached fetch of the supported-locale list from Strapi.
//!
//! The registry is the single source of truth for which locales the site
//! serves. The list changes rarely, so responses are cached in memory with
//! a short TTL. Every failure mode degrades to an empty list: callers must
//! treat an empty result as "locales unknown" and operate in single-locale
//! mode, never as an error.

use crate::i18n::locale::{Locale, SupportedCodes};
use crate::retry::{is_retryable_error, with_retry_if, RetryConfig};
use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

struct CacheEntry {
    locales: Vec<Locale>,
    fetched_at: Instant,
}

/// Cached client for Strapi's `/api/i18n/locales` endpoint.
pub struct LocaleRegistry {
    client: reqwest::Client,
    base_url: String,
    ttl: Duration,
    timeout: Duration,
    cache: Mutex<Option<CacheEntry>>,
    // Latch so a flapping CMS warns once per registry, not once per render
    warned: AtomicBool,
}

impl LocaleRegistry {
    /// Create a registry against the given Strapi base URL.
    ///
    /// # Arguments
    /// * `client` - shared reqwest client
    /// * `base_url` - content source base URL, without a trailing slash
    /// * `ttl` - how long a fetched locale list stays valid
    /// * `timeout` - per-request timeout for the locale endpoint
    pub fn new(client: reqwest::Client, base_url: String, ttl: Duration, timeout: Duration) -> Self {
        Self {
            client,
            base_url,
            ttl,
            timeout,
            cache: Mutex::new(None),
            warned: AtomicBool::new(false),
        }
    }

    /// Get the supported locales, from cache when fresh.
    ///
    /// On a cache miss the list is fetched synchronously before returning.
    /// Network failures, non-2xx responses, and malformed bodies all yield
    /// an empty vector; the cache is only replaced on success, so a later
    /// call can recover once the CMS is reachable again.
    pub async fn get_available_locales(&self) -> Vec<Locale> {
        if let Some(cached) = self.cached_locales() {
            debug!("Locale list served from cache ({} entries)", cached.len());
            return cached;
        }

        match self.fetch_locales().await {
            Ok(locales) => {
                let mut cache = self.cache.lock().unwrap();
                *cache = Some(CacheEntry {
                    locales: locales.clone(),
                    fetched_at: Instant::now(),
                });
                locales
            }
            Err(e) => {
                self.warn_once(&format!("Failed to fetch locales: {:#}", e));
                Vec::new()
            }
        }
    }

    /// Build the authoritative supported-code set from the current locale
    /// list, falling back to the static shipped codes when the registry is
    /// in degraded mode.
    pub async fn supported_codes(&self) -> SupportedCodes {
        SupportedCodes::from_locales(&self.get_available_locales().await)
    }

    fn cached_locales(&self) -> Option<Vec<Locale>> {
        let cache = self.cache.lock().unwrap();
        cache
            .as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.locales.clone())
    }

    async fn fetch_locales(&self) -> Result<Vec<Locale>> {
        let url = format!("{}/api/i18n/locales", self.base_url);

        let body = with_retry_if(
            &RetryConfig::cms_fetch(),
            "Locale list fetch",
            || async {
                let response = self
                    .client
                    .get(&url)
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
                    .json::<serde_json::Value>()
                    .await
                    .context("Failed to parse locale response")
            },
            is_retryable_error,
        )
        .await?;

        // Strapi returns a bare JSON array; anything else is malformed
        match body {
            serde_json::Value::Array(entries) => {
                let locales: Vec<Locale> = entries
                    .into_iter()
                    .filter_map(|entry| serde_json::from_value(entry).ok())
                    .collect();
                debug!("Fetched {} locales from Strapi", locales.len());
                Ok(locales)
            }
            other => {
                self.warn_once(&format!("Locales data is not an array: {}", other));
                Ok(Vec::new())
            }
        }
    }

    fn warn_once(&self, message: &str) {
        if !self.warned.swap(true, Ordering::Relaxed) {
            warn!("{}", message);
        } else {
            debug!("{}", message);
        }
    }
}
