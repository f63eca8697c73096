//! Match highlighting for result excerpts.

use crate::debug;
use regex::RegexBuilder;

/// Wrap every case-insensitive occurrence of each token in `<mark>` tags.
///
/// Tokens are escaped before compilation so user input is matched literally,
/// never as a pattern. Tokens are applied in sequence order; a later token
/// can re-wrap text inserted for an earlier one (including the `mark` tags
/// themselves). That re-wrapping quirk is inherited site behavior and is
/// kept as-is.
pub fn highlight(text: &str, tokens: &[String]) -> String {
    let mut out = text.to_string();
    for token in tokens {
        let pattern = match RegexBuilder::new(&regex::escape(token))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => re,
            Err(e) => {
                // Escaped literals always compile; keep the excerpt readable
                // if that assumption ever breaks.
                debug!("search"; "highlight pattern for '{}' failed: {}", token, e);
                continue;
            }
        };
        out = pattern.replace_all(&out, "<mark>$0</mark>").into_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn test_highlight_single_occurrence() {
        assert_eq!(
            highlight("learning rust today", &tokens(&["rust"])),
            "learning <mark>rust</mark> today"
        );
    }

    #[test]
    fn test_highlight_all_occurrences() {
        assert_eq!(
            highlight("rust and rust", &tokens(&["rust"])),
            "<mark>rust</mark> and <mark>rust</mark>"
        );
    }

    #[test]
    fn test_highlight_case_insensitive_preserves_original() {
        assert_eq!(
            highlight("Rust and RUST", &tokens(&["rust"])),
            "<mark>Rust</mark> and <mark>RUST</mark>"
        );
    }

    #[test]
    fn test_highlight_no_match_returns_unchanged() {
        let excerpt = "nothing to see here";
        assert_eq!(highlight(excerpt, &tokens(&["rust"])), excerpt);
    }

    #[test]
    fn test_highlight_empty_tokens_unchanged() {
        assert_eq!(highlight("text", &[]), "text");
    }

    #[test]
    fn test_highlight_special_chars_matched_literally() {
        assert_eq!(
            highlight("price is $5 (sale)", &tokens(&["$5"])),
            "price is <mark>$5</mark> (sale)"
        );
        assert_eq!(
            highlight("a.c abc", &tokens(&["a.c"])),
            "<mark>a.c</mark> abc"
        );
    }

    #[test]
    fn test_highlight_marks_every_token() {
        // Case-insensitive matching and literal specials in one pass; no
        // token may silently pass through unmarked.
        let out = highlight("Rust RUST $5", &tokens(&["rust", "$5"]));
        assert_eq!(out, "<mark>Rust</mark> <mark>RUST</mark> <mark>$5</mark>");
    }

    #[test]
    fn test_highlight_later_token_rewraps_earlier() {
        // Inherited quirk: the second token also matches inside the mark
        // tags inserted for the first.
        let out = highlight("mark the spot", &tokens(&["spot", "mark"]));
        assert_eq!(
            out,
            "<mark>mark</mark> the <<mark>mark</mark>>spot</<mark>mark</mark>>"
        );
    }
}
