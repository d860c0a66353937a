use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::feed::{FeedClient, FetchError, Item};
use crate::registry::{FeedSource, Registry};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of one fetch attempt for one source.
#[derive(Debug)]
pub struct FetchResult {
    pub source: FeedSource,
    pub channel_title: String,
    pub items: Vec<Item>,
    pub error: Option<FetchError>,
}

impl FetchResult {
    fn failed(source: FeedSource, error: FetchError) -> Self {
        Self {
            source,
            channel_title: String::new(),
            items: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// The feeds that fetched successfully in one round, in completion order.
#[derive(Debug, Default)]
pub struct River {
    results: Vec<FetchResult>,
}

impl River {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: FetchResult) {
        self.results.push(result);
    }

    pub fn iter(&self) -> impl Iterator<Item = &FetchResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.results
            .iter()
            .map(|r| r.source.name.as_str())
            .collect()
    }
}

pub struct Fetcher {
    client: Arc<dyn FeedClient + Send + Sync>,
    timeout: Duration,
}

impl Fetcher {
    pub fn new(client: Arc<dyn FeedClient + Send + Sync>) -> Self {
        Self::with_timeout(client, DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_timeout(client: Arc<dyn FeedClient + Send + Sync>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Fetch every registered source concurrently and wait for all of them.
    ///
    /// Each source gets its own task and its own deadline. Failed or late
    /// sources are logged and left out, so the returned river holds at most
    /// one result per source and may be empty.
    pub async fn river(&self, registry: &Registry) -> River {
        info!("Fetching {} feeds", registry.len());

        let mut tasks = JoinSet::new();
        for source in registry.iter().cloned() {
            let client = self.client.clone();
            let timeout = self.timeout;
            tasks.spawn(async move { fetch_source(client, source, timeout).await });
        }

        let mut river = River::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(FetchResult {
                    source,
                    error: Some(e),
                    ..
                }) => warn!("Failed to fetch feed '{}': {}", source.name, e),
                Ok(result) => river.push(result),
                Err(e) => error!("Feed fetch task failed: {}", e),
            }
        }

        info!("Fetched {} of {} feeds", river.len(), registry.len());
        river
    }
}

async fn fetch_source(
    client: Arc<dyn FeedClient + Send + Sync>,
    source: FeedSource,
    timeout: Duration,
) -> FetchResult {
    debug!("Fetching feed: {} ({})", source.name, source.url);

    match tokio::time::timeout(timeout, client.fetch(&source.url)).await {
        Ok(Ok(channel)) => {
            debug!("Got {} items from '{}'", channel.items.len(), source.name);
            FetchResult {
                source,
                channel_title: channel.title,
                items: channel.items,
                error: None,
            }
        }
        Ok(Err(e)) => FetchResult::failed(source, e),
        Err(_) => FetchResult::failed(source, FetchError::Timeout(timeout)),
    }
}
