use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feed_river::cli::Cli;
use feed_river::config::Config;
use feed_river::feed::HttpFeedClient;
use feed_river::fetcher::Fetcher;
use feed_river::registry::Registry;
use feed_river::routes::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feed_river=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.feeds)?.with_overrides(&cli)?;
    let registry = Registry::from_configs(&config.feeds);
    info!("Loaded {} feeds from {}", registry.len(), cli.feeds.display());

    // Create fetcher
    let timeout = Duration::from_secs(config.fetch_timeout);
    let client = HttpFeedClient::new(timeout).context("failed to create HTTP client")?;
    let fetcher = Fetcher::with_timeout(Arc::new(client), timeout);

    let state = Arc::new(AppState { registry, fetcher });
    let app = routes::router(state, &config.url_path);

    // Start server
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Serving on :{}{}", config.port, config.url_path);

    axum::serve(listener, app).await?;

    Ok(())
}
