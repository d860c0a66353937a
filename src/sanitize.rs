//! Text transforms applied to rendered item HTML before it is displayed.
//!
//! Tag stripping is pattern based, not a real HTML parse, so malformed or
//! oddly nested markup is not guaranteed to come out clean. Site stages run
//! after tag stripping, so removing their literal text can splice a fresh tag
//! together (`<Commentsimg ...>` becomes `<img ...>`) that stays in the output.

use std::sync::LazyLock;

use regex::Regex;

/// Open and close tags for `img`, `br`, `a` and `iframe`, attributes included.
static STRIPPED_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?(?:img|br|a|iframe)\b[^>]*>").unwrap());

const SLASHDOT_TRAILER: &str = "Read more of this story at Slashdot.";
const HACKER_NEWS_LINK: &str = "Comments";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    StripTags,
    StripSlashdot,
    StripHackerNews,
}

impl Stage {
    pub fn apply(self, content: &str) -> String {
        match self {
            Stage::StripTags => strip_tags(content),
            Stage::StripSlashdot => content.replace(SLASHDOT_TRAILER, ""),
            Stage::StripHackerNews => content.replace(HACKER_NEWS_LINK, ""),
        }
    }
}

/// Remove stripped tags until none are left. Removing one tag can splice
/// its neighbours into a new one (`<<a>img>`), hence the loop.
pub fn strip_tags(content: &str) -> String {
    let mut current = content.to_string();
    while STRIPPED_TAGS.is_match(&current) {
        current = STRIPPED_TAGS.replace_all(&current, "").into_owned();
    }
    current
}

/// The ordered stages for one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Select stages from the feed URL: tag stripping always, then at most
    /// one site-specific stage.
    pub fn for_url(url: &str) -> Self {
        let mut stages = vec![Stage::StripTags];
        if url.contains("slashdot") {
            stages.push(Stage::StripSlashdot);
        } else if url.contains("ycombinator") {
            stages.push(Stage::StripHackerNews);
        }
        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run each stage once, in order. Tags spliced together by a site stage
    /// are not stripped again.
    pub fn apply(&self, content: &str) -> String {
        self.stages
            .iter()
            .fold(content.to_string(), |acc, stage| stage.apply(&acc))
    }
}
