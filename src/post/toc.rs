//! Table of contents generation.
//!
//! Builds a two-level outline from the post's `<h2>`/`<h3>` headings: each
//! h2 opens a top-level entry, and the h3s that follow it nest underneath
//! until the next h2.

use super::rewrite::RawHeading;
use crate::utils::html::{escape, escape_attr};

/// One outline entry. Children are always leaves (h3 under h2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    fn new(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            children: Vec::new(),
        }
    }
}

/// Build the outline from scanned headings and their final ids.
///
/// An h3 with no preceding h2 becomes a top-level entry of its own rather
/// than being dropped, so posts that open with a subsection still get a
/// complete outline.
pub fn build(headings: &[RawHeading], ids: &[String]) -> Vec<TocEntry> {
    debug_assert_eq!(headings.len(), ids.len());

    let mut entries: Vec<TocEntry> = Vec::new();
    let mut under_h2 = false;

    for (heading, id) in headings.iter().zip(ids) {
        let entry = TocEntry::new(id, heading.text.trim());
        if heading.level == 2 {
            entries.push(entry);
            under_h2 = true;
        } else if under_h2 {
            // Scan order guarantees a last entry exists here
            if let Some(parent) = entries.last_mut() {
                parent.children.push(entry);
            }
        } else {
            entries.push(entry);
        }
    }

    entries
}

/// Render the outline as an `<ol>` with nested `<ul>` sub-lists.
pub fn render(entries: &[TocEntry]) -> String {
    let mut out = String::from("<ol>");
    for entry in entries {
        out.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            escape_attr(&entry.id),
            escape(&entry.text)
        ));
        if !entry.children.is_empty() {
            out.push_str("<ul>");
            for child in &entry.children {
                out.push_str(&format!(
                    "<li><a href=\"#{}\">{}</a></li>",
                    escape_attr(&child.id),
                    escape(&child.text)
                ));
            }
            out.push_str("</ul>");
        }
        out.push_str("</li>");
    }
    out.push_str("</ol>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(level: u8, text: &str) -> RawHeading {
        RawHeading {
            level,
            text: text.into(),
            id: None,
        }
    }

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn test_build_nests_h3_under_preceding_h2() {
        let headings = [
            heading(2, "Setup"),
            heading(3, "Install"),
            heading(3, "Configure"),
            heading(2, "Usage"),
            heading(3, "Basics"),
        ];
        let toc = build(&headings, &ids(&["setup", "install", "configure", "usage", "basics"]));

        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].text, "Setup");
        assert_eq!(toc[0].children.len(), 2);
        assert_eq!(toc[0].children[1].id, "configure");
        assert_eq!(toc[1].children.len(), 1);
    }

    #[test]
    fn test_build_orphan_h3_becomes_top_level() {
        let headings = [heading(3, "Orphan"), heading(2, "Section")];
        let toc = build(&headings, &ids(&["orphan", "section"]));

        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].text, "Orphan");
        assert!(toc[0].children.is_empty());
    }

    #[test]
    fn test_build_empty() {
        assert!(build(&[], &[]).is_empty());
    }

    #[test]
    fn test_render_nested_lists() {
        let headings = [heading(2, "Setup"), heading(3, "Install")];
        let toc = build(&headings, &ids(&["setup", "install"]));
        assert_eq!(
            render(&toc),
            "<ol><li><a href=\"#setup\">Setup</a>\
             <ul><li><a href=\"#install\">Install</a></li></ul>\
             </li></ol>"
        );
    }

    #[test]
    fn test_render_escapes_text() {
        let toc = [TocEntry::new("a-b", "A & B")];
        assert!(render(&toc).contains("A &amp; B"));
    }
}
