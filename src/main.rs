//! starcharts - star history charts for GitHub repositories
//!
//! # Usage
//! ```bash
//! starcharts                                  # Listen on 127.0.0.1:3000
//! GITHUB_TOKEN=... starcharts --listen 0.0.0.0:8080
//! curl localhost:3000/caarlos0/starcharts.svg?variant=dark
//! ```

mod cache;
mod chart;
mod config;
mod error;
mod github;
mod models;
mod pages;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use std::sync::Arc;
use std::time::Duration;

use axum::http::Method;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache::MemoryCache;
use config::Config;
use github::GitHubClient;
use state::AppState;

/// How often expired charts are dropped from memory.
const PURGE_INTERVAL: Duration = Duration::from_secs(600);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.github_token.is_none() {
        tracing::warn!("GITHUB_TOKEN not set, GitHub will rate limit aggressively");
    }

    let github = GitHubClient::new(&config)?;
    let cache = Arc::new(MemoryCache::new(config.cache_capacity));
    spawn_purge(cache.clone());

    let state = AppState::new(
        Arc::new(github),
        cache,
        config.cache_ttl(),
        config.request_timeout(),
    );

    // Charts are embedded from anywhere.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let app = routes::create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    tracing::info!(listen = %config.listen, "starting up...");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
        }
        tracing::info!("shutting down");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

fn spawn_purge(cache: Arc<MemoryCache>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = cache.purge_expired().await;
            if purged > 0 {
                let remaining = cache.len().await;
                tracing::debug!(purged, remaining, "purged expired charts");
            }
        }
    });
}
