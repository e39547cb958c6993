use anyhow::Result;
use std::sync::Arc;
use strapi_locale::config::Config;
use strapi_locale::server::{build_router, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("strapi_locale=info".parse()?),
        )
        .init();

    info!("Starting localized-content server");

    // Load configuration from environment
    let config = Arc::new(Config::from_env()?);
    info!("Content source: {}", config.strapi_base_url);

    let state = AppState::new(config.clone());
    let router = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
