//! Eager generation entry points.
//!
//! The flow is deliberately short: render the prompt, make the one provider
//! call, run the Block Formatter on whatever came back. The formatter is
//! total, so once the provider call succeeds nothing after it can fail.

use crate::config::GenerationConfig;
use crate::error::BlogsmithError;
use crate::output::{Article, ArticleStats};
use crate::pipeline::{format, llm};
use crate::prompts;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Generate an article for a topic and render it to HTML.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// - [`BlogsmithError::InvalidConfig`] for an empty topic or missing API key
///   (checked before any network I/O)
/// - the provider taxonomy: [`BlogsmithError::AuthError`],
///   [`BlogsmithError::RateLimited`], [`BlogsmithError::EmptyResult`],
///   [`BlogsmithError::TransportError`]
///
/// No internal retry: a regenerate action is simply another call.
pub async fn generate(
    topic: impl AsRef<str>,
    config: &GenerationConfig,
) -> Result<Article, BlogsmithError> {
    let topic = topic.as_ref().trim();
    if topic.is_empty() {
        return Err(BlogsmithError::InvalidConfig(
            "Topic must not be empty".into(),
        ));
    }

    let start = Instant::now();
    let prompt = prompts::article_prompt(
        topic,
        config.word_target,
        config.prompt_template.as_deref(),
    );
    debug!("Prompt rendered: {} bytes", prompt.len());

    let markdown = llm::request_article(&prompt, config).await?;
    let html = format::format_markdown(&markdown);

    let stats = ArticleStats::from_markdown(&markdown, start.elapsed().as_millis() as u64);
    info!(
        "Generated {} words in {}ms",
        stats.word_count, stats.duration_ms
    );

    Ok(Article {
        topic: topic.to_string(),
        markdown,
        html,
        stats,
    })
}

/// Generate an article and write the HTML directly to a file.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn generate_to_file(
    topic: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &GenerationConfig,
) -> Result<ArticleStats, BlogsmithError> {
    let article = generate(topic, config).await?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                BlogsmithError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }
    }

    let tmp_path = path.with_extension("html.tmp");
    tokio::fs::write(&tmp_path, &article.html)
        .await
        .map_err(|e| BlogsmithError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| BlogsmithError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(article.stats)
}

/// Synchronous wrapper around [`generate`].
///
/// Creates a temporary tokio runtime internally.
pub fn generate_sync(
    topic: impl AsRef<str>,
    config: &GenerationConfig,
) -> Result<Article, BlogsmithError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| BlogsmithError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(generate(topic, config))
}
