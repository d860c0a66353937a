//! Feed River - a merged view of many syndication feeds
//!
//! Every request fetches all configured feeds in parallel, cleans each
//! source's item HTML and renders the items as one page.

pub mod cli;
pub mod config;
pub mod feed;
pub mod fetcher;
pub mod registry;
pub mod render;
pub mod routes;
pub mod sanitize;
