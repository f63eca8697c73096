//! Search command implementation.
//!
//! Loads the document index, ranks it against the query, and prints the
//! result list markup on stdout. An empty or omitted query prints the
//! recent-documents listing instead.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::config::SiteConfig;
use crate::debug;
use crate::search::{self, SearchIndex};
use crate::utils::plural_count;

/// Execute search command
pub fn run_search(query: Option<&str>, index: Option<&PathBuf>, config: &SiteConfig) -> Result<()> {
    let index_path = match index {
        Some(path) => path.clone(),
        None => config.root_join(&config.search.index),
    };

    let index = SearchIndex::load(&index_path);
    debug!("search"; "loaded {} from {}", plural_count(index.len(), "document"), index_path.display());

    let query = query.unwrap_or("");
    let hits = search::query::execute(&index, query, &config.search);
    debug!("search"; "{} for {query:?}", plural_count(hits.len(), "hit"));

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", search::render::render(&hits))?;
    Ok(())
}
