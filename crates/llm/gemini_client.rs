use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Minimal Gemini `generateContent` client built on reqwest.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: GeminiContent<'a>,
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<GeminiRequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiRequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    pub content: Option<GeminiCandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidateContent {
    #[serde(default)]
    pub parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorDetails,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetails {
    code: Option<i64>,
    message: Option<String>,
    status: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn into_text(self) -> Result<String> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .context("gemini response has no candidates")?;

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            anyhow::bail!(
                "gemini candidate has no text (finish_reason={:?})",
                candidate.finish_reason
            );
        }

        Ok(text)
    }
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String, model: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build gemini http client")?;

        Ok(Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    async fn ensure_success(resp: reqwest::Response, context: &str) -> Result<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let (error_code, error_status, error_message) =
            match serde_json::from_str::<GeminiErrorEnvelope>(&body) {
                Ok(envelope) => (
                    envelope.error.code,
                    envelope.error.status,
                    envelope.error.message,
                ),
                Err(_) => (None, None, None),
            };

        error!(
            status = %status,
            gemini_error_code = ?error_code,
            gemini_error_status = ?error_status,
            gemini_error_message = ?error_message,
            context = %context,
            "gemini api request failed"
        );

        anyhow::bail!("Gemini API request failed: {} (status {})", context, status);
    }

    /// Sends one `generateContent` call and returns the raw model text. No retries.
    pub async fn generate_text(
        &self,
        system_instruction: &str,
        user_message: &str,
        max_output_tokens: u32,
    ) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiRequestPart {
                    text: system_instruction,
                }],
            },
            contents: vec![GeminiContent {
                role: Some("user"),
                parts: vec![GeminiRequestPart { text: user_message }],
            }],
            generation_config: GenerationConfig { max_output_tokens },
        };

        debug!(model = %self.model, max_output_tokens, "gemini: sending generateContent");

        let resp = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("gemini request could not be sent")?;

        let resp = Self::ensure_success(resp, "generateContent").await?;
        let parsed = resp
            .json::<GenerateContentResponse>()
            .await
            .context("gemini response was not valid json")?;

        parsed.into_text()
    }
}
