//! Post page enhancement.
//!
//! Takes a rendered post page and layers on the presentation extras the
//! templates leave to tooling:
//!
//! - reading time estimate from the visible article text
//! - anchor ids for `<h2>`/`<h3>` headings that lack one
//! - a nested table of contents injected into its target element
//! - the copy-link button state machine
//!
//! A page without the article content container passes through unchanged.

pub mod copylink;
pub mod reading;
mod rewrite;
pub mod toc;

pub use copylink::CopyLinkButton;
pub use toc::TocEntry;

use crate::config::PostConfig;
use crate::utils::slug::slugify;
use anyhow::Result;
use rewrite::RawHeading;

/// Result of enhancing one post page.
#[derive(Debug)]
pub struct EnhancedPost {
    /// The rewritten page HTML.
    pub html: String,
    /// "N min read", present when the content container was found.
    pub reading_time: Option<String>,
    /// Word count behind the reading time.
    pub word_count: usize,
    /// Generated outline (empty when the post has no h2/h3 headings).
    pub toc: Vec<TocEntry>,
    /// Copy-link button state, present when the page carries the button.
    pub copy_link: Option<CopyLinkButton>,
}

/// Enhance a rendered post page.
///
/// `page_url` is the canonical location of the page, used by the copy-link
/// affordance when the button has no explicit `data-url`.
pub fn enhance(html: &str, page_url: &str, config: &PostConfig) -> Result<EnhancedPost> {
    let scan = rewrite::scan(html, config)?;

    if !scan.found_content {
        return Ok(EnhancedPost {
            html: html.to_string(),
            reading_time: None,
            word_count: 0,
            toc: Vec::new(),
            copy_link: None,
        });
    }

    let ids = assign_ids(&scan.headings, &config.fallback_slug);
    let toc = toc::build(&scan.headings, &ids);
    let reading_time = reading::reading_time(scan.word_count, config.words_per_minute);
    let toc_html = (!toc.is_empty()).then(|| toc::render(&toc));

    let html = rewrite::apply(html, config, &ids, &reading_time, toc_html.as_deref())?;

    let copy_link = scan
        .copy_link
        .map(|target| CopyLinkButton::new(&target.label, target.data_url, page_url));

    Ok(EnhancedPost {
        html,
        reading_time: Some(reading_time),
        word_count: scan.word_count,
        toc,
        copy_link,
    })
}

/// Final anchor id for every scanned heading, in document order.
///
/// Existing ids are kept as-is and never regenerated; missing ones are
/// slugified from the heading text, falling back to the configured generic
/// identifier when the text has no alphanumeric characters.
fn assign_ids(headings: &[RawHeading], fallback: &str) -> Vec<String> {
    headings
        .iter()
        .map(|h| match &h.id {
            Some(id) => id.clone(),
            None => {
                let slug = slugify(&h.text);
                if slug.is_empty() {
                    fallback.to_string()
                } else {
                    slug
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PostConfig {
        PostConfig::default()
    }

    const PAGE: &str = r#"<html><body>
<span id="reading-time"></span>
<nav id="post-toc"></nav>
<div class="post-content">
<p>Intro words here.</p>
<h2>Getting Started!!</h2>
<p>Some body text.</p>
<h3>Install</h3>
<p>More text.</p>
<h2 id="existing">Kept Anchor</h2>
</div>
<button id="copy-link-btn" data-url="https://example.com/p/">Copy link</button>
</body></html>"#;

    #[test]
    fn test_enhance_assigns_missing_ids() {
        let post = enhance(PAGE, "https://example.com/", &config()).unwrap();
        assert!(post.html.contains(r#"<h2 id="getting-started">"#));
        assert!(post.html.contains(r#"<h3 id="install">"#));
        // Existing id untouched
        assert!(post.html.contains(r#"<h2 id="existing">"#));
        assert!(!post.html.contains(r#"id="kept-anchor""#));
    }

    #[test]
    fn test_enhance_injects_reading_time() {
        let post = enhance(PAGE, "https://example.com/", &config()).unwrap();
        let rt = post.reading_time.unwrap();
        assert_eq!(rt, "1 min read");
        assert!(post.html.contains(r#"<span id="reading-time">1 min read</span>"#));
    }

    #[test]
    fn test_enhance_injects_toc() {
        let post = enhance(PAGE, "https://example.com/", &config()).unwrap();
        assert_eq!(post.toc.len(), 2);
        assert!(post.html.contains(r##"<a href="#getting-started">"##));
        assert!(post.html.contains(r##"<a href="#install">"##));
    }

    #[test]
    fn test_enhance_picks_up_copy_link_button() {
        let post = enhance(PAGE, "https://example.com/", &config()).unwrap();
        let button = post.copy_link.unwrap();
        assert_eq!(button.target_url(), "https://example.com/p/");
        assert_eq!(button.label(), "Copy link");
    }

    #[test]
    fn test_enhance_without_content_is_identity() {
        let html = "<html><body><p>No article here.</p></body></html>";
        let post = enhance(html, "", &config()).unwrap();
        assert_eq!(post.html, html);
        assert!(post.reading_time.is_none());
        assert!(post.toc.is_empty());
        assert!(post.copy_link.is_none());
    }

    #[test]
    fn test_assign_ids_fallback_for_punctuation_heading() {
        let headings = vec![
            RawHeading {
                level: 2,
                text: "!!!".into(),
                id: None,
            },
            RawHeading {
                level: 2,
                text: "Real Title".into(),
                id: None,
            },
        ];
        let ids = assign_ids(&headings, "section");
        assert_eq!(ids, ["section", "real-title"]);
    }
}
