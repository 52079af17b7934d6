//! Error types for the blogsmith library.
//!
//! The generation collaborator is the only fallible component: the Block
//! Formatter ([`crate::pipeline::format`]) is total over all string inputs
//! and has no error type at all. [`BlogsmithError`] therefore covers the
//! single outbound API call plus configuration and file-output failures.
//!
//! The four provider kinds (auth, rate limit, empty result, transport) are
//! kept distinguishable so callers can present distinct user-facing messages
//! and decide for themselves whether a regenerate action makes sense. The
//! library never retries internally — a retry is an explicit re-invocation.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the blogsmith library.
#[derive(Debug, Error)]
pub enum BlogsmithError {
    // ── Provider errors ───────────────────────────────────────────────────
    /// The provider rejected the request or credential (HTTP 400/401/403).
    #[error("Authentication error (HTTP {status}): {detail}\nCheck your Gemini API key and its permissions.")]
    AuthError { status: u16, detail: String },

    /// The provider signalled throttling (HTTP 429) — back off and regenerate later.
    #[error("Rate limit exceeded. Try again in a few minutes.")]
    RateLimited { retry_after_secs: Option<u64> },

    /// The provider responded successfully but returned no usable text.
    #[error("No content generated: {detail}\nTry a different topic.")]
    EmptyResult { detail: String },

    /// Any other network or protocol failure (timeouts, 5xx, broken JSON).
    #[error("Generation request failed: {reason}\nCheck your internet connection.")]
    TransportError { reason: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder or caller validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
