//! Text-generation transport.
//!
//! [`TextGenerator`] is the seam the insight client talks to; [`GeminiTransport`]
//! is the HTTP implementation for the `generateContent` endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{GenerationConfig, InsightConfig};
use crate::result::AiError;

/// Sends one prompt and returns the model's raw text.
#[async_trait]
pub trait TextGenerator: Send + Sync + 'static {
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: &'a GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

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
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}

/// HTTP client for a Gemini-style `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiTransport {
    http: reqwest::Client,
    config: InsightConfig,
}

impl GeminiTransport {
    pub fn new(config: InsightConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    async fn request(&self, prompt: &str) -> Result<String, AiError> {
        let credential = self.config.credential.as_deref().ok_or_else(|| {
            AiError::configuration("API key not configured (set SALESIGHT_AI_API_KEY)")
        })?;

        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: &self.config.generation,
        };

        let resp = self
            .http
            .post(&self.config.endpoint)
            .query(&[("key", credential)])
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Transport {
                status: None,
                // The URL carries the API key; keep it out of the error.
                body: e.without_url().to_string(),
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| AiError::Transport {
            status: Some(status.as_u16()),
            body: e.without_url().to_string(),
        })?;

        if !status.is_success() {
            return Err(AiError::Transport {
                status: Some(status.as_u16()),
                body: text,
            });
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| AiError::protocol(format!("response is not a generateContent envelope: {e}")))?;

        envelope
            .into_text()
            .ok_or_else(|| AiError::protocol("response has no candidates[0].content.parts[0].text"))
    }
}

#[async_trait]
impl TextGenerator for GeminiTransport {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        debug!(prompt_len = prompt.len(), "sending prompt to text-generation endpoint");
        match self.request(prompt).await {
            Ok(text) => {
                debug!(reply_len = text.len(), "text-generation reply received");
                Ok(text)
            }
            Err(e) => {
                warn!(error = %e, reason = %e.reason(), "text-generation request failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_matches_wire_format() {
        let generation = GenerationConfig::default();
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: "hello" }],
            }],
            generation_config: &generation,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "contents": [{ "parts": [{ "text": "hello" }] }],
                "generationConfig": {
                    "temperature": 0.7,
                    "topK": 40,
                    "topP": 0.95,
                    "maxOutputTokens": 1024
                }
            })
        );
    }

    #[test]
    fn envelope_yields_first_candidate_first_part() {
        let env: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
                { "content": { "parts": [{ "text": "other" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(env.into_text().as_deref(), Some("first"));
    }

    #[test]
    fn envelope_without_text_is_empty() {
        for raw in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{}] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": "" }] } }] }),
        ] {
            let env: GenerateContentResponse = serde_json::from_value(raw.clone()).unwrap();
            assert!(env.into_text().is_none(), "expected no text for {raw}");
        }
    }

    #[tokio::test]
    async fn missing_credential_fails_before_network() {
        // Unroutable endpoint: reaching the network would surface a transport error instead.
        let transport =
            GeminiTransport::new(InsightConfig::default().with_endpoint("http://0.0.0.0:1/none")).unwrap();
        let err = transport.generate("hi").await.unwrap_err();
        assert!(matches!(err, AiError::Configuration(_)));
    }
}
