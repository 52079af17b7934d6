//! Instructional templates for article generation.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — changing the default behaviour (tone,
//!    structure guidance, word target) requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect the rendered prompt directly
//!    without making an API call, so regressions in the template are caught
//!    before they cost tokens.
//!
//! Callers can override the default via
//! [`crate::config::GenerationConfig::prompt_template`]; the constant here is
//! used only when no override is provided.

/// Default instructional template for generating a blog article.
///
/// `{topic}` and `{word_target}` are interpolated by [`article_prompt`]. The
/// heading-level guidance at the end matters: the Block Formatter keys on
/// `#`/`##`/`###` prefixes, so the model is told explicitly which levels to
/// use.
pub const ARTICLE_PROMPT_TEMPLATE: &str = r#"You are a professional blog writer. Write a comprehensive, well-structured, and engaging {word_target}-word blog post about: "{topic}"

Please follow these guidelines:
- Start with an engaging title
- Create a compelling introduction that hooks the reader
- Use clear headings and subheadings to organize content
- Write in a conversational yet professional tone
- Include practical examples, insights, or actionable advice
- Use proper paragraph breaks for readability
- End with a strong conclusion that summarizes key points
- Make it informative, valuable, and engaging for readers
- Aim for approximately {word_target} words

Format the output with proper markdown headings (# for main title, ## for sections, ### for subsections) and ensure good flow between paragraphs."#;

/// Render the article prompt for a topic.
///
/// Uses `template` when provided (the caller's override), the built-in
/// [`ARTICLE_PROMPT_TEMPLATE`] otherwise.
pub fn article_prompt(topic: &str, word_target: usize, template: Option<&str>) -> String {
    template
        .unwrap_or(ARTICLE_PROMPT_TEMPLATE)
        .replace("{topic}", topic)
        .replace("{word_target}", &word_target.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_interpolates_topic_and_word_target() {
        let p = article_prompt("rust lifetimes", 1000, None);
        assert!(p.contains("\"rust lifetimes\""));
        assert!(p.contains("1000-word"));
        assert!(p.contains("approximately 1000 words"));
    }

    #[test]
    fn prompt_carries_heading_guidance() {
        let p = article_prompt("x", 500, None);
        assert!(p.contains("# for main title"));
        assert!(p.contains("## for sections"));
        assert!(p.contains("### for subsections"));
    }

    #[test]
    fn custom_template_is_used_verbatim() {
        let p = article_prompt("cats", 300, Some("Write about {topic}."));
        assert_eq!(p, "Write about cats.");
    }
}
