//! Result types returned by the generation entry points.

use serde::{Deserialize, Serialize};

/// A generated article: the provider's Markdown plus the formatted HTML.
///
/// Both representations are kept so callers can offer raw-text actions
/// (copy, download) alongside the rendered view without re-running either
/// the provider or the formatter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// The topic the article was generated for.
    pub topic: String,
    /// Markdown exactly as returned by the provider.
    pub markdown: String,
    /// Display-ready HTML fragments produced by the Block Formatter.
    pub html: String,
    /// Generation statistics.
    pub stats: ArticleStats,
}

/// Statistics for one generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleStats {
    /// Whitespace-separated word count of the Markdown.
    pub word_count: usize,
    /// Estimated reading time, `ceil(words / 200)` minutes.
    pub reading_minutes: usize,
    /// Wall-clock duration of the generation, milliseconds.
    pub duration_ms: u64,
}

impl ArticleStats {
    /// Compute word-derived stats from the generated Markdown.
    pub(crate) fn from_markdown(markdown: &str, duration_ms: u64) -> Self {
        let word_count = markdown.split_whitespace().count();
        Self {
            word_count,
            reading_minutes: word_count.div_ceil(200),
            duration_ms,
        }
    }
}
