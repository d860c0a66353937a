use anyhow::{bail, Context};
use serde::Deserialize;
use std::path::Path;

use crate::cli::Cli;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path the river page is served on
    #[serde(default = "default_url_path")]
    pub url_path: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-source fetch deadline in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout: u64,
    pub feeds: Vec<FeedConfig>,
}

fn default_url_path() -> String {
    "/".to_string()
}

fn default_port() -> u16 {
    4242
}

fn default_fetch_timeout() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FeedConfig {
    pub name: String,
    pub url: String,
}

impl Config {
    /// Read the feed list. Validation happens in [`Config::with_overrides`],
    /// once command-line values are applied.
    ///
    /// Files ending in `.json` use the bare `[{"name", "url"}]` list format,
    /// everything else is read as TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read feeds file {}", path.display()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json(&content)
        } else {
            Self::from_str(&content)
        }
        .with_context(|| format!("invalid feeds file {}", path.display()))?;

        Ok(config)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let feeds: Vec<FeedConfig> = serde_json::from_str(content)?;
        let config = Config {
            url_path: default_url_path(),
            port: default_port(),
            fetch_timeout: default_fetch_timeout(),
            feeds,
        };
        Ok(config)
    }

    /// Apply command-line overrides on top of the file values and validate
    /// the result.
    pub fn with_overrides(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(url_path) = &cli.url_path {
            self.url_path = url_path.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(timeout) = cli.fetch_timeout {
            self.fetch_timeout = timeout;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.feeds.is_empty() {
            bail!("no feeds configured");
        }
        for (i, feed) in self.feeds.iter().enumerate() {
            if feed.name.trim().is_empty() {
                bail!("feed #{} has an empty name", i + 1);
            }
            if feed.url.trim().is_empty() {
                bail!("feed '{}' has an empty url", feed.name);
            }
        }
        if !self.url_path.starts_with('/') {
            bail!("url path '{}' must start with '/'", self.url_path);
        }
        if self.fetch_timeout == 0 {
            bail!("fetch_timeout must be at least one second");
        }
        Ok(())
    }
}
