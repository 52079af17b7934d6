//! Configuration types for article generation.
//!
//! All generation behaviour is controlled through [`GenerationConfig`], built
//! via its [`GenerationConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across calls, serialise them for logging, and
//! diff two runs to understand why their outputs differ.
//!
//! The Block Formatter takes no configuration at all — it is a pure function
//! of its input — so everything here concerns the single provider call.

use crate::error::BlogsmithError;
use serde::{Deserialize, Serialize};

/// Configuration for one article generation.
///
/// Built via [`GenerationConfig::builder()`] or [`GenerationConfig::default()`].
///
/// # Example
/// ```rust
/// use blogsmith::GenerationConfig;
///
/// let config = GenerationConfig::builder()
///     .api_key("AIza...")
///     .model("gemini-1.5-flash")
///     .word_target(1200)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Gemini API key. If None, read from `GEMINI_API_KEY` at request time.
    /// Never serialised — configs get logged.
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,

    /// Model identifier. Default: "gemini-1.5-flash".
    pub model: String,

    /// Base URL override for the generation endpoint. Default: the public
    /// Google endpoint. Useful for proxies and test servers.
    pub endpoint: Option<String>,

    /// Sampling temperature. Default: 0.7.
    ///
    /// Article writing wants some creativity; 0.7 keeps the prose varied
    /// without drifting off-topic the way values near 2.0 do.
    pub temperature: f32,

    /// Top-k sampling cutoff. Default: 40.
    pub top_k: u32,

    /// Nucleus sampling cutoff. Default: 0.95.
    pub top_p: f32,

    /// Maximum tokens the model may generate. Default: 2048.
    ///
    /// A ~1000-word article lands around 1300–1600 tokens; 2048 leaves
    /// headroom for heading markup and tables without letting a runaway
    /// completion cost multiples of a normal one.
    pub max_output_tokens: u32,

    /// Approximate word count requested in the prompt. Default: 1000.
    pub word_target: usize,

    /// Custom prompt template. If None, uses the built-in default.
    ///
    /// Overrides the whole instructional template; the topic is interpolated
    /// wherever `{topic}` appears.
    pub prompt_template: Option<String>,

    /// Per-request timeout in seconds. Default: 60.
    pub api_timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-1.5-flash".to_string(),
            endpoint: None,
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 2048,
            word_target: 1000,
            prompt_template: None,
            api_timeout_secs: 60,
        }
    }
}

impl GenerationConfig {
    /// Create a new builder for `GenerationConfig`.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder {
            config: Self::default(),
        }
    }

    /// Resolve the API key, falling back to the `GEMINI_API_KEY` env var.
    pub(crate) fn resolve_api_key(&self) -> Result<String, BlogsmithError> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Ok(key.clone());
            }
        }
        match std::env::var("GEMINI_API_KEY") {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(BlogsmithError::InvalidConfig(
                "No API key configured. Set GEMINI_API_KEY or pass one explicitly.".into(),
            )),
        }
    }
}

/// Builder for [`GenerationConfig`].
#[derive(Debug)]
pub struct GenerationConfigBuilder {
    config: GenerationConfig,
}

impl GenerationConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = Some(url.into());
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn top_k(mut self, k: u32) -> Self {
        self.config.top_k = k.max(1);
        self
    }

    pub fn top_p(mut self, p: f32) -> Self {
        self.config.top_p = p.clamp(0.0, 1.0);
        self
    }

    pub fn max_output_tokens(mut self, n: u32) -> Self {
        self.config.max_output_tokens = n.max(1);
        self
    }

    pub fn word_target(mut self, words: usize) -> Self {
        self.config.word_target = words;
        self
    }

    pub fn prompt_template(mut self, template: impl Into<String>) -> Self {
        self.config.prompt_template = Some(template.into());
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<GenerationConfig, BlogsmithError> {
        let c = &self.config;
        if c.model.trim().is_empty() {
            return Err(BlogsmithError::InvalidConfig(
                "Model identifier must not be empty".into(),
            ));
        }
        if c.word_target == 0 {
            return Err(BlogsmithError::InvalidConfig(
                "Word target must be ≥ 1".into(),
            ));
        }
        if c.api_timeout_secs == 0 {
            return Err(BlogsmithError::InvalidConfig(
                "API timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}
