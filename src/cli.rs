use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "feed-river")]
#[command(about = "Serves a river of items merged from a set of RSS/Atom feeds", long_about = None)]
pub struct Cli {
    /// Feeds file (TOML, or a JSON list of { "name", "url" } objects)
    #[arg(long, default_value = "feeds.toml")]
    pub feeds: PathBuf,

    /// URL path the river page is served on
    #[arg(long = "urlpath")]
    pub url_path: Option<String>,

    /// Port number for this instance
    #[arg(long)]
    pub port: Option<u16>,

    /// Seconds to wait for a single feed before leaving it out of the river
    #[arg(long)]
    pub fetch_timeout: Option<u64>,
}
