use std::collections::HashMap;

use tracing::warn;

use crate::config::FeedConfig;

/// A named feed to poll. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl From<&FeedConfig> for FeedSource {
    fn from(config: &FeedConfig) -> Self {
        Self {
            name: config.name.clone(),
            url: config.url.clone(),
        }
    }
}

/// The set of configured feed sources, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    sources: HashMap<String, FeedSource>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from configuration. A repeated name replaces the
    /// earlier entry.
    pub fn from_configs(configs: &[FeedConfig]) -> Self {
        let mut registry = Self::new();
        for config in configs {
            registry.insert(FeedSource::from(config));
        }
        registry
    }

    pub fn insert(&mut self, source: FeedSource) {
        if let Some(previous) = self.sources.insert(source.name.clone(), source) {
            warn!(
                "Duplicate feed name '{}', replacing {}",
                previous.name, previous.url
            );
        }
    }

    pub fn get(&self, name: &str) -> Option<&FeedSource> {
        self.sources.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedSource> {
        self.sources.values()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
