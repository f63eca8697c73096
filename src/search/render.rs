//! Result list rendering.
//!
//! Thin adapter from ranked hits to the HTML fragment the result container
//! expects. Titles and URLs are escaped; excerpts pass through as-is since
//! they come from the trusted site build (possibly carrying `<mark>` tags
//! from highlighting).

use super::Hit;
use crate::utils::html::{escape, escape_attr};

/// Render hits as `<li>` entries, or the no-results placeholder.
pub fn render(hits: &[Hit<'_>]) -> String {
    if hits.is_empty() {
        return "<li>No results</li>".to_string();
    }

    hits.iter()
        .map(|hit| {
            format!(
                "<li class=\"search-result\">\n  \
                 <a href=\"{url}\">{title}</a>\n  \
                 <div class=\"meta\">{date}</div>\n  \
                 <p>{excerpt}</p>\n\
                 </li>",
                url = escape_attr(&hit.doc.url),
                title = escape(&hit.doc.title),
                date = hit.doc.date.to_long_date(),
                excerpt = hit.excerpt,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
