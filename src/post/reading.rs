//! Reading time estimation.

/// Estimated minutes for a word count, floored at 1.
pub fn minutes(word_count: usize, words_per_minute: usize) -> usize {
    word_count.div_ceil(words_per_minute.max(1)).max(1)
}

/// Format the reading time label: "N min read".
pub fn reading_time(word_count: usize, words_per_minute: usize) -> String {
    format!("{} min read", minutes(word_count, words_per_minute))
}
