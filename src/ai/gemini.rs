//! Generative Language (Gemini) REST backend
//!
//! One attempt per request: no retry, no backoff. The response schema is sent
//! along with the prompt so the model is constrained to JSON server-side; the
//! clients still validate everything that comes back.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

use super::{ContentBackend, GenerationRequest};
use crate::config::BackendConfig;
use crate::{ExplorerError, Result};

/// Client for `POST {base_url}/models/{model}:generateContent`
pub struct GeminiBackend {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        if let Some(reason) = &candidate.finish_reason {
            debug!("Candidate finished with reason {}", reason);
        }
        let text: String = candidate
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

impl GeminiBackend {
    /// Create a new backend from configuration
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ExplorerError::config(
                    "No backend API key configured. Set EXPLORER__BACKEND__API_KEY or GEMINI_API_KEY.",
                )
            })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("china-explorer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ExplorerError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(&self.model)
        )
    }
}

fn request_body(request: &GenerationRequest) -> Value {
    json!({
        "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": request.schema,
        }
    })
}

#[async_trait]
impl ContentBackend for GeminiBackend {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate(&self, request: &GenerationRequest) -> Result<Value> {
        let start_time = Instant::now();

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(request))
            .send()
            .await
            .map_err(|e| {
                warn!("Backend request failed: {}", e);
                ExplorerError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Backend returned {}: {}", status, error_text);
            return Err(match status.as_u16() {
                401 | 403 => ExplorerError::backend("backend rejected the API key"),
                429 => ExplorerError::backend("backend rate limit exceeded"),
                _ => ExplorerError::backend(format!("backend error {status}: {error_text}")),
            });
        }

        let envelope: GenerateContentResponse = response.json().await.map_err(|e| {
            error!("Failed to parse backend envelope: {}", e);
            ExplorerError::backend(format!("invalid backend envelope: {e}"))
        })?;

        let text = envelope
            .text()
            .ok_or_else(|| ExplorerError::backend("backend returned no candidate text"))?;

        let value: Value = serde_json::from_str(&text).map_err(|e| {
            error!("Model output is not JSON: {}", e);
            ExplorerError::backend(format!("model output is not JSON: {e}"))
        })?;

        info!(
            "Generation finished in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> BackendConfig {
        BackendConfig {
            api_key: key.map(str::to_string),
            ..BackendConfig::default()
        }
    }

    #[test]
    fn test_requires_api_key() {
        let err = GeminiBackend::new(&config_with_key(None)).err().unwrap();
        assert!(matches!(err, ExplorerError::Config { .. }));

        let err = GeminiBackend::new(&config_with_key(Some("  "))).err().unwrap();
        assert!(matches!(err, ExplorerError::Config { .. }));
    }

    #[test]
    fn test_endpoint() {
        let mut config = config_with_key(Some("test-key-123456"));
        config.base_url = "https://example.com/v1beta/".to_string();
        config.model = "gemini-test".to_string();
        let backend = GeminiBackend::new(&config).unwrap();
        assert_eq!(
            backend.endpoint(),
            "https://example.com/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_request_body_carries_schema() {
        let request = GenerationRequest {
            prompt: "hello".to_string(),
            schema: json!({ "type": "OBJECT" }),
        };
        let body = request_body(&request);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_envelope_text_joins_parts() {
        let envelope: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"food\":" }, { "text": "[\"粽子\"]}" }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        let text = envelope.text().unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["food"][0], "粽子");
    }

    #[test]
    fn test_envelope_without_candidates() {
        let envelope: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": {} })).unwrap();
        assert!(envelope.text().is_none());
    }
}
