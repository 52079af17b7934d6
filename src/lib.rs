//! # blogsmith
//!
//! Generate structured blog articles from a topic string and render them to
//! display-ready HTML.
//!
//! ## Why this crate?
//!
//! LLM text endpoints return Markdown-ish prose: mostly well-formed, but with
//! ragged edges — unterminated code fences, tables without separator rows,
//! lists that switch kind mid-stream. A strict Markdown parser rejects or
//! "corrects" exactly that kind of output. The Block Formatter here is a
//! single-pass line classifier that is total over all inputs: malformed
//! constructs degrade to plain paragraphs instead of erroring, so whatever
//! the model returns, the caller gets renderable HTML.
//!
//! ## Pipeline Overview
//!
//! ```text
//! topic
//!  │
//!  ├─ 1. Prompt  render the fixed instructional template (~1000-word article)
//!  ├─ 2. LLM     one HTTPS POST to the Gemini generateContent endpoint
//!  ├─ 3. Format  single-pass Markdown → HTML block formatter
//!  └─ 4. Output  Article { markdown, html, stats }
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blogsmith::{generate, GenerationConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // API key read from GEMINI_API_KEY unless set on the config
//!     let config = GenerationConfig::default();
//!     let article = generate("why rust borrow checking works", &config).await?;
//!     println!("{}", article.html);
//!     eprintln!("{} words, ~{} min read",
//!         article.stats.word_count,
//!         article.stats.reading_minutes);
//!     Ok(())
//! }
//! ```
//!
//! The formatter is also usable on its own, with no API key and no I/O:
//!
//! ```rust
//! use blogsmith::format_markdown;
//!
//! assert_eq!(format_markdown("# Title"), "<h1>Title</h1>");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `blogsmith` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! blogsmith = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod prompts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{GenerationConfig, GenerationConfigBuilder};
pub use error::BlogsmithError;
pub use generate::{generate, generate_sync, generate_to_file};
pub use output::{Article, ArticleStats};
pub use pipeline::format::format_markdown;
