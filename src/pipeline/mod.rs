//! Pipeline stages for topic-to-HTML article generation.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets us swap
//! implementations (e.g. point at a different provider) without touching the
//! other stage.
//!
//! ## Data Flow
//!
//! ```text
//! topic ──▶ prompt ──▶ llm ──▶ format
//! (string)  (template) (HTTPS)  (block formatter)
//! ```
//!
//! 1. [`crate::prompts`] — render the fixed instructional template for the topic
//! 2. [`llm`]    — one POST to the generation endpoint; the only stage with
//!    network I/O, and the only fallible one
//! 3. [`format`] — the Block Formatter: single-pass conversion of the
//!    returned Markdown into display-ready HTML fragments; total, pure,
//!    never fails

pub mod format;
pub mod llm;
