//! Retrieval and parsing of a single feed.
//!
//! The fetcher only depends on the [`FeedClient`] shape: give it a URL, get
//! back the channel title and its items, or an error.

use std::time::Duration;

use async_trait::async_trait;
use feed_rs::parser::{self, ParseFeedError};
use reqwest::{Client, StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),

    #[error("Feed parsing error: {0}")]
    Parse(#[from] ParseFeedError),

    #[error("no response within {0:?}")]
    Timeout(Duration),
}

/// A parsed feed channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Channel {
    pub title: String,
    pub items: Vec<Item>,
}

/// One feed entry, taken verbatim from the upstream document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    pub title: String,
    pub description_html: String,
}

impl Item {
    pub fn new(title: impl Into<String>, description_html: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description_html: description_html.into(),
        }
    }
}

#[async_trait]
pub trait FeedClient {
    async fn fetch(&self, url: &str) -> Result<Channel, FetchError>;
}

pub struct HttpFeedClient {
    client: Client,
}

impl HttpFeedClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("FeedRiver/0.1 (RSS River)")
            .build()?;

        Ok(Self { client })
    }

    /// Parse a raw RSS/Atom document into a [`Channel`].
    pub fn parse_channel(bytes: &[u8]) -> Result<Channel, FetchError> {
        let parsed = parser::parse(bytes)?;

        let title = parsed.title.map(|t| t.content).unwrap_or_default();

        let items = parsed
            .entries
            .into_iter()
            .map(|entry| {
                let title = entry.title.map(|t| t.content).unwrap_or_default();

                // RSS <description> and Atom <summary> land in `summary`;
                // content:encoded / Atom <content> is the fallback
                let description_html = entry
                    .summary
                    .map(|s| s.content)
                    .or_else(|| entry.content.and_then(|c| c.body))
                    .unwrap_or_default();

                Item {
                    title,
                    description_html,
                }
            })
            .collect();

        Ok(Channel { title, items })
    }
}

#[async_trait]
impl FeedClient for HttpFeedClient {
    async fn fetch(&self, url: &str) -> Result<Channel, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let bytes = response.bytes().await?;
        Self::parse_channel(&bytes)
    }
}
