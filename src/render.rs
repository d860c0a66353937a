use askama::Template;

use crate::feed::Item;
use crate::fetcher::{FetchResult, River};
use crate::sanitize::Pipeline;

/// The full page: fixed header, one chunk per source, fixed footer.
#[derive(Template)]
#[template(path = "river.html")]
pub struct RiverTemplate {
    pub chunks: Vec<String>,
}

fn render_item(item: &Item) -> String {
    format!("<h3>{}</h3>\n{}\n", item.title, item.description_html)
}

/// Render one source's items, each passed through that source's own
/// pipeline. A source with no items renders as nothing.
pub fn render_source(result: &FetchResult) -> String {
    let pipeline = Pipeline::for_url(&result.source.url);
    result
        .items
        .iter()
        .map(|item| pipeline.apply(&render_item(item)))
        .collect()
}

pub fn render_river(river: &River) -> anyhow::Result<String> {
    let chunks = river
        .iter()
        .map(render_source)
        .filter(|chunk| !chunk.is_empty())
        .collect();

    Ok(RiverTemplate { chunks }.render()?)
}
