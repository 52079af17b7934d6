//! Provider interaction: one HTTPS POST to the Gemini generateContent
//! endpoint per invocation.
//!
//! This module is intentionally thin — all prompt engineering lives in
//! [`crate::prompts`] so it can be changed without touching the wire types or
//! the error mapping here.
//!
//! ## No retry, by contract
//!
//! Exactly one network call happens per invocation. A "regenerate" action in
//! a caller is an explicit re-invocation, not automatic backoff; the error
//! kinds returned here ([`BlogsmithError::RateLimited`] in particular) give
//! the caller what it needs to decide when to do that.

use crate::config::GenerationConfig;
use crate::error::BlogsmithError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

// ── Wire types (request) ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: SamplingParams,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SamplingParams {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

/// The four standard harm categories, all at the provider's recommended
/// medium-and-above threshold.
fn default_safety_settings() -> Vec<SafetySetting> {
    const CATEGORIES: [&str; 4] = [
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        "HARM_CATEGORY_DANGEROUS_CONTENT",
    ];
    CATEGORIES
        .iter()
        .map(|&category| SafetySetting {
            category,
            threshold: "BLOCK_MEDIUM_AND_ABOVE",
        })
        .collect()
}

// ── Wire types (response) ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

// ── Request ──────────────────────────────────────────────────────────────────

/// Send the rendered prompt to the provider and return the generated text.
///
/// Performs exactly one POST. Non-2xx statuses map onto the error taxonomy:
/// 400/401/403 → [`BlogsmithError::AuthError`], 429 →
/// [`BlogsmithError::RateLimited`], everything else →
/// [`BlogsmithError::TransportError`]. A 2xx response without usable text is
/// [`BlogsmithError::EmptyResult`].
pub async fn request_article(
    prompt: &str,
    config: &GenerationConfig,
) -> Result<String, BlogsmithError> {
    let api_key = config.resolve_api_key()?;
    let base = config.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
    let url = format!(
        "{}/v1beta/models/{}:generateContent?key={}",
        base.trim_end_matches('/'),
        config.model,
        api_key
    );

    let body = GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
        generation_config: SamplingParams {
            temperature: config.temperature,
            top_k: config.top_k,
            top_p: config.top_p,
            max_output_tokens: config.max_output_tokens,
        },
        safety_settings: default_safety_settings(),
    };

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.api_timeout_secs))
        .build()
        .map_err(|e| BlogsmithError::TransportError {
            reason: e.to_string(),
        })?;

    info!("Requesting article from model {}", config.model);
    let response = client.post(&url).json(&body).send().await.map_err(|e| {
        BlogsmithError::TransportError {
            reason: if e.is_timeout() {
                format!("request timed out after {}s", config.api_timeout_secs)
            } else {
                e.to_string()
            },
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let retry_after = parse_retry_after(&response);
        let detail = response.text().await.unwrap_or_default();
        debug!("Provider returned HTTP {}: {}", status, detail);
        return Err(map_error_status(status.as_u16(), retry_after, detail));
    }

    let parsed: GenerateContentResponse =
        response
            .json()
            .await
            .map_err(|e| BlogsmithError::TransportError {
                reason: format!("malformed response body: {e}"),
            })?;

    extract_text(parsed)
}

/// Seconds to wait as advertised by a `Retry-After` header, if any.
fn parse_retry_after(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Map a non-2xx status onto the error taxonomy.
fn map_error_status(status: u16, retry_after_secs: Option<u64>, detail: String) -> BlogsmithError {
    match status {
        400 | 401 | 403 => BlogsmithError::AuthError {
            status,
            detail: if detail.is_empty() {
                "invalid API key or request".to_string()
            } else {
                detail
            },
        },
        429 => BlogsmithError::RateLimited { retry_after_secs },
        _ => BlogsmithError::TransportError {
            reason: format!("HTTP {status}"),
        },
    }
}

/// Pull the single generated text field out of the response document.
fn extract_text(response: GenerateContentResponse) -> Result<String, BlogsmithError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| BlogsmithError::EmptyResult {
            detail: "response contained no candidates".to_string(),
        })?;

    let text = candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .map(|p| p.text)
        .unwrap_or_default();

    if text.is_empty() {
        return Err(BlogsmithError::EmptyResult {
            detail: "candidate contained no text".to_string(),
        });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_uses_camel_case_keys() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hi".into() }],
            }],
            generation_config: SamplingParams {
                temperature: 0.7,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: 2048,
            },
            safety_settings: default_safety_settings(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("generationConfig").is_some());
        assert!(json.get("safetySettings").is_some());
        let gc = &json["generationConfig"];
        assert_eq!(gc["topK"], 40);
        assert_eq!(gc["maxOutputTokens"], 2048);
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn four_safety_categories_at_medium_threshold() {
        let settings = default_safety_settings();
        assert_eq!(settings.len(), 4);
        assert!(settings
            .iter()
            .all(|s| s.threshold == "BLOCK_MEDIUM_AND_ABOVE"));
    }

    #[test]
    fn status_mapping_matches_taxonomy() {
        assert!(matches!(
            map_error_status(400, None, String::new()),
            BlogsmithError::AuthError { status: 400, .. }
        ));
        assert!(matches!(
            map_error_status(403, None, "denied".into()),
            BlogsmithError::AuthError { status: 403, .. }
        ));
        assert!(matches!(
            map_error_status(429, Some(30), String::new()),
            BlogsmithError::RateLimited {
                retry_after_secs: Some(30)
            }
        ));
        assert!(matches!(
            map_error_status(500, None, String::new()),
            BlogsmithError::TransportError { .. }
        ));
        assert!(matches!(
            map_error_status(503, None, String::new()),
            BlogsmithError::TransportError { .. }
        ));
    }

    #[test]
    fn missing_candidates_is_empty_result() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            extract_text(parsed),
            Err(BlogsmithError::EmptyResult { .. })
        ));
    }

    #[test]
    fn empty_text_is_empty_result() {
        let parsed: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#)
                .unwrap();
        assert!(matches!(
            extract_text(parsed),
            Err(BlogsmithError::EmptyResult { .. })
        ));
    }

    #[test]
    fn text_is_extracted_from_first_candidate_part() {
        let parsed: GenerateContentResponse = serde_json::from_str(
            r##"{"candidates":[{"content":{"parts":[{"text":"# Hello"},{"text":"ignored"}]}}]}"##,
        )
        .unwrap();
        assert_eq!(extract_text(parsed).unwrap(), "# Hello");
    }
}
