//! Full-text search over the site's document index.
//!
//! The site build emits `search.json`: a flat JSON array of document
//! records. This module owns loading that index and turning a query string
//! into ranked, highlighted results. Scoring and rendering are split so the
//! ranking pipeline is testable without touching the filesystem:
//!
//! - [`SearchIndex::load`] - index loading with silent degradation
//! - [`query::execute`] - pure query -> ranked hits
//! - [`render::render`] - hits -> HTML list fragments

pub mod highlight;
pub mod query;
pub mod render;

use crate::debug;
use crate::utils::date::DateTimeUtc;
use serde::{Deserialize, Deserializer, de};
use std::fmt;
use std::path::Path;

// ============================================================================
// Document Record
// ============================================================================

/// One indexed page's searchable metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub title: String,
    pub url: String,
    pub excerpt: String,
    pub content: String,
    pub date: PostDate,
}

/// Publication date of an indexed document.
///
/// Site builds are inconsistent about this field: some emit ISO strings,
/// others raw Unix timestamps. Both deserialize to the same UTC datetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostDate(pub DateTimeUtc);

impl PostDate {
    /// Long-form human date: "June 15, 2024".
    pub fn to_long_date(self) -> String {
        self.0.to_long_date()
    }
}

impl<'de> Deserialize<'de> for PostDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DateVisitor;

        impl de::Visitor<'_> for DateVisitor {
            type Value = PostDate;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an ISO date string or a Unix timestamp")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<PostDate, E> {
                DateTimeUtc::parse(v)
                    .map(PostDate)
                    .ok_or_else(|| E::custom(format!("invalid date: {v}")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<PostDate, E> {
                DateTimeUtc::from_unix(v)
                    .map(PostDate)
                    .ok_or_else(|| E::custom(format!("invalid timestamp: {v}")))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<PostDate, E> {
                let ts = i64::try_from(v)
                    .map_err(|_| E::custom(format!("timestamp out of range: {v}")))?;
                self.visit_i64(ts)
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<PostDate, E> {
                #[allow(clippy::cast_possible_truncation)]
                self.visit_i64(v as i64)
            }
        }

        deserializer.deserialize_any(DateVisitor)
    }
}

// ============================================================================
// Search Index
// ============================================================================

/// Owned document index, loaded once and queried many times.
#[derive(Debug, Default)]
pub struct SearchIndex {
    documents: Vec<Document>,
}

impl SearchIndex {
    /// Build an index from already-parsed documents.
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Load the index from a JSON file.
    ///
    /// Failure is silent by contract: a missing or malformed index yields
    /// the empty index, and every query then renders the no-results
    /// placeholder. The cause is only visible under `--verbose`.
    pub fn load(path: &Path) -> Self {
        let documents = match std::fs::read(path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(docs) => docs,
                Err(e) => {
                    debug!("search"; "malformed index {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(e) => {
                debug!("search"; "failed to read index {}: {}", path.display(), e);
                Vec::new()
            }
        };
        Self { documents }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

// ============================================================================
// Scored Result
// ============================================================================

/// Transient pairing of a document with its relevance score and the
/// excerpt as it should be displayed (highlighted for ranked results,
/// untouched for the default view).
#[derive(Debug)]
pub struct Hit<'a> {
    pub doc: &'a Document,
    pub score: usize,
    pub excerpt: String,
}

// ============================================================================
// Tests
// ============================================================================
