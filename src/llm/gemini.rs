// src/llm/gemini.rs
// Gemini classification client using the Google AI generateContent API

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::TriageConfig;
use crate::error::TriageError;
use crate::llm::build_triage_prompt;
use crate::schema::TriageResponse;

/// Request timeout for the Gemini call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Classification client for the Gemini API.
///
/// Holds the shared HTTP client and the read-only credential; one outbound
/// call is made per `classify` invocation, no retries at this layer.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &TriageConfig) -> Result<Self, TriageError> {
        if config.api_key.is_empty() {
            return Err(TriageError::Config("Gemini API key is required".to_string()));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| TriageError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(GeminiClient {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        })
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the API URL for a given method
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.base_url, self.model, method, self.api_key
        )
    }

    /// Classify a validated customer message into a `TriageResponse`.
    ///
    /// Requests structured JSON output at temperature 0 and re-validates the
    /// parsed reply locally; a reply that does not match the schema is
    /// rejected rather than trusted.
    pub async fn classify(&self, message: &str) -> Result<TriageResponse, TriageError> {
        let prompt = build_triage_prompt(message);
        debug!(chars = message.chars().count(), "sending triage request to Gemini");

        let request_body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": 0.0,
                "responseMimeType": "application/json",
                "responseSchema": TriageResponse::response_schema()
            }
        });

        let response = self
            .client
            .post(self.api_url("generateContent"))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            let error_msg = match status.as_u16() {
                400 => format!("invalid request: {error_text}"),
                401 | 403 => "invalid API key".to_string(),
                429 => "rate limit exceeded".to_string(),
                _ => format!("Gemini API error {status}: {error_text}"),
            };
            warn!(%status, "Gemini call failed: {error_text}");
            return Err(TriageError::Upstream(error_msg));
        }

        let response_json: Value = response.json().await?;
        Self::parse_reply(&response_json)
    }

    /// Extract and validate the structured reply from a generateContent body.
    fn parse_reply(response_json: &Value) -> Result<TriageResponse, TriageError> {
        let content_str = response_json
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.get(0))
            .and_then(|p| p.get("text"))
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                TriageError::InvalidOutput("no text candidate in Gemini response".to_string())
            })?;

        let triage: TriageResponse = serde_json::from_str(content_str).map_err(|e| {
            TriageError::InvalidOutput(format!("reply is not a valid triage result: {e}"))
        })?;
        triage.validate()?;

        debug!(
            category = triage.category.as_str(),
            score = triage.score,
            "classification complete"
        );
        Ok(triage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Category;

    fn gemini_body(text: &str) -> Value {
        serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": text }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 40 }
        })
    }

    #[test]
    fn test_parse_valid_reply() {
        let body = gemini_body(
            r#"{"category":"TECHNICAL_SUPPORT","reasoning":"Login failures are a technical issue.","score":0.95}"#,
        );
        let triage = GeminiClient::parse_reply(&body).unwrap();
        assert_eq!(triage.category, Category::TechnicalSupport);
        assert_eq!(triage.score, 0.95);
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        let body = gemini_body(r#"{"category":"SPAM","reasoning":"nope","score":0.5}"#);
        let err = GeminiClient::parse_reply(&body).unwrap_err();
        assert!(matches!(err, TriageError::InvalidOutput(_)));
    }

    #[test]
    fn test_parse_rejects_out_of_range_score() {
        let body = gemini_body(r#"{"category":"SALES","reasoning":"pricing question","score":1.5}"#);
        let err = GeminiClient::parse_reply(&body).unwrap_err();
        assert!(matches!(err, TriageError::InvalidOutput(_)));
    }

    #[test]
    fn test_parse_rejects_non_json_text() {
        let body = gemini_body("Sure! The category is probably TECHNICAL_SUPPORT.");
        let err = GeminiClient::parse_reply(&body).unwrap_err();
        assert!(matches!(err, TriageError::InvalidOutput(_)));
    }

    #[test]
    fn test_parse_rejects_missing_candidates() {
        let body = serde_json::json!({ "candidates": [] });
        let err = GeminiClient::parse_reply(&body).unwrap_err();
        assert!(matches!(err, TriageError::InvalidOutput(_)));
    }

    #[test]
    fn test_api_url_shape() {
        let config = TriageConfig {
            api_key: "test-key".to_string(),
            model: "gemini-1.5-flash-latest".to_string(),
            base_url: "https://example.test/v1beta".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
        };
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(client.model(), "gemini-1.5-flash-latest");
        assert_eq!(
            client.api_url("generateContent"),
            "https://example.test/v1beta/models/gemini-1.5-flash-latest:generateContent?key=test-key"
        );
    }
}
