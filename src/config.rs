use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Strapi content source
    pub strapi_base_url: String,

    // Fetch timeouts
    pub locale_fetch_timeout: Duration,
    pub translation_fetch_timeout: Duration,

    // Locale list cache
    pub locale_cache_ttl: Duration,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Strapi - the variable name is shared with the frontend build,
            // so it keeps the NEXT_PUBLIC_ prefix
            strapi_base_url: std::env::var("NEXT_PUBLIC_STRAPI_BASE_URL")
                .context("NEXT_PUBLIC_STRAPI_BASE_URL not set")
                .map(|url| url.trim_end_matches('/').to_string())?,

            // Timeouts
            locale_fetch_timeout: Duration::from_millis(
                std::env::var("LOCALE_FETCH_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5000),
            ),
            translation_fetch_timeout: Duration::from_millis(
                std::env::var("TRANSLATION_FETCH_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5000),
            ),

            // Cache
            locale_cache_ttl: Duration::from_millis(
                std::env::var("LOCALE_CACHE_TTL_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60_000),
            ),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}
