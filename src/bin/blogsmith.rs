//! CLI binary for blogsmith.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `GenerationConfig` and prints results.

use anyhow::{Context, Result};
use blogsmith::{format_markdown, generate, generate_to_file, GenerationConfig};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Generate an article (HTML to stdout)
  blogsmith "the history of coffee"

  # Write to a file
  blogsmith "rust async pitfalls" -o article.html

  # Raw markdown instead of HTML
  blogsmith --markdown "urban beekeeping"

  # Shorter article, specific model
  blogsmith --word-target 600 --model gemini-1.5-flash "soil health"

  # Structured JSON (markdown + html + stats)
  blogsmith --json "home espresso" > article.json

  # Render a local markdown file, no API key needed
  blogsmith --render-only notes.md

ERROR KINDS:
  Authentication   bad or unauthorized API key (HTTP 400/401/403) — fix the key
  Rate limited     HTTP 429 — wait and rerun; blogsmith never retries itself
  Empty result     the model returned no usable text — try another topic
  Transport        anything else network-shaped — check connectivity

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY          Gemini API key
  BLOGSMITH_MODEL         Override model ID
  BLOGSMITH_ENDPOINT      Override the endpoint base URL (proxies, test servers)

SETUP:
  1. Get a key:   https://aistudio.google.com/apikey
  2. Export it:   export GEMINI_API_KEY=AIza...
  3. Generate:    blogsmith "your topic" -o article.html
"#;

/// Generate structured blog articles and render them to HTML.
#[derive(Parser, Debug)]
#[command(
    name = "blogsmith",
    version,
    about = "Generate blog articles from a topic using Gemini and render them to HTML",
    long_about = "Generate a structured ~1000-word blog article for a topic via the Gemini \
generateContent endpoint, then convert the returned Markdown to display-ready HTML with a \
single-pass block formatter that never fails on malformed input.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Topic to write about.
    #[arg(required_unless_present = "render_only")]
    topic: Option<String>,

    /// Write output to this file instead of stdout.
    #[arg(short, long, env = "BLOGSMITH_OUTPUT")]
    output: Option<PathBuf>,

    /// Gemini API key (falls back to GEMINI_API_KEY).
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model ID.
    #[arg(long, env = "BLOGSMITH_MODEL", default_value = "gemini-1.5-flash")]
    model: String,

    /// Endpoint base URL override (proxies, test servers).
    #[arg(long, env = "BLOGSMITH_ENDPOINT")]
    endpoint: Option<String>,

    /// Print the raw generated Markdown instead of HTML.
    #[arg(long, conflicts_with = "json")]
    markdown: bool,

    /// Output structured JSON (topic, markdown, html, stats).
    #[arg(long, env = "BLOGSMITH_JSON")]
    json: bool,

    /// Approximate word count to request.
    #[arg(long, env = "BLOGSMITH_WORD_TARGET", default_value_t = 1000)]
    word_target: usize,

    /// Max tokens the model may generate.
    #[arg(long, env = "BLOGSMITH_MAX_TOKENS", default_value_t = 2048)]
    max_tokens: u32,

    /// Sampling temperature (0.0–2.0).
    #[arg(long, env = "BLOGSMITH_TEMPERATURE", default_value_t = 0.7)]
    temperature: f32,

    /// Request timeout in seconds.
    #[arg(long, env = "BLOGSMITH_TIMEOUT", default_value_t = 60)]
    timeout: u64,

    /// Path to a text file containing a custom prompt template.
    #[arg(long, env = "BLOGSMITH_PROMPT_TEMPLATE")]
    prompt_template: Option<PathBuf>,

    /// Render a local markdown file to HTML; no generation, no API key.
    #[arg(long, value_name = "FILE", conflicts_with = "topic")]
    render_only: Option<PathBuf>,

    /// Disable the progress spinner.
    #[arg(long, env = "BLOGSMITH_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "BLOGSMITH_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the article itself.
    #[arg(short, long, env = "BLOGSMITH_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner provides all the feedback that matters interactively;
    // suppress INFO-level library logs unless asked for more.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    // ── Render-only mode ─────────────────────────────────────────────────
    if let Some(ref md_path) = cli.render_only {
        let text = tokio::fs::read_to_string(md_path)
            .await
            .with_context(|| format!("Failed to read markdown from {md_path:?}"))?;
        let html = format_markdown(&text);
        emit(&html)?;
        return Ok(());
    }

    // ── Build config ─────────────────────────────────────────────────────
    let config = build_config(&cli).await?;
    let topic = cli.topic.clone().unwrap_or_default();

    let spinner = if show_progress {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Generating");
        bar.set_message(topic.clone());
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    // ── Run generation ───────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        if cli.markdown || cli.json {
            // Non-HTML file output goes through the generic path below.
            let article = generate(&topic, &config).await;
            if let Some(bar) = spinner {
                bar.finish_and_clear();
            }
            let article = article.context("Generation failed")?;
            let body = if cli.json {
                serde_json::to_string_pretty(&article).context("Failed to serialise output")?
            } else {
                article.markdown.clone()
            };
            tokio::fs::write(output_path, body)
                .await
                .with_context(|| format!("Failed to write {output_path:?}"))?;
            summary(&cli, article.stats.word_count, article.stats.duration_ms, Some(output_path));
        } else {
            let stats = generate_to_file(&topic, output_path, &config).await;
            if let Some(bar) = spinner {
                bar.finish_and_clear();
            }
            let stats = stats.context("Generation failed")?;
            summary(&cli, stats.word_count, stats.duration_ms, Some(output_path));
        }
    } else {
        let article = generate(&topic, &config).await;
        if let Some(bar) = spinner {
            bar.finish_and_clear();
        }
        let article = article.context("Generation failed")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&article).context("Failed to serialise output")?
            );
        } else if cli.markdown {
            emit(&article.markdown)?;
        } else {
            emit(&article.html)?;
        }
        summary(&cli, article.stats.word_count, article.stats.duration_ms, None);
    }

    Ok(())
}

/// Write a body to stdout with a guaranteed trailing newline.
fn emit(body: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(body.as_bytes())
        .context("Failed to write to stdout")?;
    if !body.ends_with('\n') {
        handle.write_all(b"\n").ok();
    }
    Ok(())
}

/// One-line run summary on stderr.
fn summary(cli: &Cli, words: usize, duration_ms: u64, path: Option<&PathBuf>) {
    if cli.quiet || cli.json {
        return;
    }
    let target = match path {
        Some(p) => format!("  →  {}", bold(&p.display().to_string())),
        None => String::new(),
    };
    eprintln!(
        "{}  {} words  {}{}",
        green("✔"),
        bold(&words.to_string()),
        dim(&format!("{:.1}s", duration_ms as f64 / 1000.0)),
        target,
    );
}

/// Map CLI args to `GenerationConfig`.
async fn build_config(cli: &Cli) -> Result<GenerationConfig> {
    let prompt_template = if let Some(ref path) = cli.prompt_template {
        Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read prompt template from {path:?}"))?,
        )
    } else {
        None
    };

    let mut builder = GenerationConfig::builder()
        .model(&cli.model)
        .word_target(cli.word_target)
        .max_output_tokens(cli.max_tokens)
        .temperature(cli.temperature)
        .api_timeout_secs(cli.timeout);

    if let Some(ref key) = cli.api_key {
        builder = builder.api_key(key);
    }
    if let Some(ref endpoint) = cli.endpoint {
        builder = builder.endpoint(endpoint);
    }
    if let Some(template) = prompt_template {
        builder = builder.prompt_template(template);
    }

    builder.build().context("Invalid configuration")
}
