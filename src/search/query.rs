//! Query tokenization, scoring, and ranking.
//!
//! The ranking pipeline is a pure function over the index and the raw query
//! string; rendering and I/O live elsewhere.

use super::highlight::highlight;
use super::{Hit, SearchIndex};
use crate::config::SearchConfig;

/// Split a raw query into lowercase tokens.
///
/// Splits on runs of whitespace; empty tokens are discarded, so an empty or
/// whitespace-only query yields no tokens.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Score a document against a token sequence.
///
/// The haystack is the lowercased concatenation of title, excerpt, and full
/// content. Each token in the sequence adds 1 if the haystack contains it as
/// a substring; repeated tokens count once per occurrence in the sequence.
pub fn score(doc: &super::Document, tokens: &[String]) -> usize {
    let hay = format!("{} {} {}", doc.title, doc.excerpt, doc.content).to_lowercase();
    tokens.iter().filter(|t| hay.contains(t.as_str())).count()
}

/// Run a query against the index, producing display-ready hits.
///
/// An empty query returns the first `default_count` documents in index
/// order, unscored and unhighlighted. Otherwise documents are scored,
/// zero scores dropped, sorted by descending score with ties keeping index
/// order, truncated to `max_results`, and their excerpts highlighted.
pub fn execute<'a>(index: &'a SearchIndex, query: &str, config: &SearchConfig) -> Vec<Hit<'a>> {
    let query = query.trim();
    let tokens = tokenize(query);

    if tokens.is_empty() {
        return index
            .documents()
            .iter()
            .take(config.default_count)
            .map(|doc| Hit {
                doc,
                score: 0,
                excerpt: doc.excerpt.clone(),
            })
            .collect();
    }

    let mut hits: Vec<Hit<'_>> = index
        .documents()
        .iter()
        .filter_map(|doc| {
            let score = score(doc, &tokens);
            (score > 0).then(|| Hit {
                doc,
                score,
                excerpt: String::new(),
            })
        })
        .collect();

    // sort_by is stable: equal scores keep their index order
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(config.max_results);

    for hit in &mut hits {
        hit.excerpt = highlight(&hit.doc.excerpt, &tokens);
    }

    hits
}
