//! Anchor slug generation for headings.
//!
//! Slugs are derived from heading text and double as URL fragments, so they
//! are folded down to lowercase ASCII: Unicode is transliterated first, then
//! every run of non-alphanumeric characters collapses to a single dash.

use deunicode::deunicode;

/// Derive an anchor-safe identifier from heading text.
///
/// Returns an empty string when the text contains no alphanumeric
/// characters; callers decide the fallback identifier.
///
/// # Example
/// ```ignore
/// assert_eq!(slugify("Getting Started!!"), "getting-started");
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text).to_lowercase();

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Getting Started!!"), "getting-started");
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify("a - b -- c"), "a-b-c");
        assert_eq!(slugify("what's new?"), "what-s-new");
    }

    #[test]
    fn test_slugify_trims_edges() {
        assert_eq!(slugify("  spaced  "), "spaced");
        assert_eq!(slugify("--dashed--"), "dashed");
    }

    #[test]
    fn test_slugify_punctuation_only_is_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_transliterates_unicode() {
        assert_eq!(slugify("Über Café"), "uber-cafe");
    }

    #[test]
    fn test_slugify_keeps_digits() {
        assert_eq!(slugify("Top 10 Posts (2024)"), "top-10-posts-2024");
    }
}
