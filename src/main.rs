use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

mod config;
mod dashboard;
mod ratings;
mod winprob;

use config::Config;
use dashboard::AppState;
use ratings::{MasseyClient, RatingsCache};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let client = MasseyClient::new(
        &config.ratings_url,
        &config.user_agent,
        Duration::from_secs(config.http_timeout_secs),
    )?;
    let cache = RatingsCache::new(Arc::new(client));

    // Warm the cache in the background so the first page load doesn't
    // block on the scrape. The cache is single-flight, so a page load
    // racing this task still causes only one fetch.
    {
        let cache = cache.clone();
        tokio::spawn(async move {
            match cache.get().await {
                Ok(snapshot) => info!("Ratings ready: {} teams", snapshot.teams.len()),
                Err(e) => warn!("Ratings prefetch failed: {}", e),
            }
        });
    }

    let state = AppState {
        cache,
        sigma: config.sigma,
    };
    let app = dashboard::router(state);
    let addr: SocketAddr = config.dashboard_addr.parse()?;
    info!("Dashboard listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
