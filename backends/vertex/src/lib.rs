//! Vertex AI backend for the Kala agents.
//!
//! Sends each prompt to a Gemini model's `generateContent` method and turns
//! the model's text answer back into a JSON object. Every failure collapses
//! into `None`, which the agents answer with their fallback value.

pub mod settings;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use kala_core::{GenerationResult, Prompt, TextGenerator};
pub use settings::VertexSettings;

/// Text generation backend backed by Vertex AI.
pub struct VertexGenerator {
    /// Endpoint, model and credentials
    settings: VertexSettings,
    /// HTTP client for API requests
    client: Client,
}

impl VertexGenerator {
    pub fn new(settings: VertexSettings) -> Self {
        Self {
            settings,
            client: Client::new(),
        }
    }

    /// Invoke the model and return its raw text answer
    async fn invoke_model(&self, prompt: &str) -> Result<String, String> {
        // Build the request payload in generateContent format
        let payload = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }
            ],
            "generationConfig": self.settings.generation_config()
        });

        let api_url = self.settings.generate_content_url();

        let mut request = self.client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .json(&payload);

        if let Some(token) = &self.settings.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| format!("Failed to send request to Vertex AI ({}): {}", api_url, e))?;

        // Check if the request was successful
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(format!(
                "Vertex AI API error ({}): {} - check model '{}' in project '{}'",
                status, error_text, self.settings.model, self.settings.project_id
            ));
        }

        let response_json: Value = response.json().await
            .map_err(|e| format!("Failed to parse Vertex AI response: {}", e))?;

        candidate_text(&response_json)
            .ok_or_else(|| "Invalid response format from Vertex AI".to_string())
    }
}

/// Concatenated text parts of the first candidate.
pub fn candidate_text(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")
        .and_then(|candidates| candidates.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse the JSON object a model answered with.
///
/// Markdown code fences and surrounding prose are tolerated; the outermost
/// `{...}` span is parsed.
pub fn parse_json_object(text: &str) -> Option<GenerationResult> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }

    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

#[async_trait]
impl TextGenerator for VertexGenerator {
    fn name(&self) -> &str {
        "vertex"
    }

    async fn generate(&self, prompt: &Prompt) -> Option<GenerationResult> {
        debug!(kind = %prompt.kind, model = %self.settings.model, "Prompt sent to Vertex AI:\n{}", prompt.text);

        let text = match self.invoke_model(&prompt.text).await {
            Ok(text) => text,
            Err(e) => {
                warn!(kind = %prompt.kind, "{}", e);
                return None;
            }
        };

        let parsed = parse_json_object(&text);
        if parsed.is_none() {
            warn!(kind = %prompt.kind, "Vertex AI answer was not a JSON object: {}", text);
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kala_core::AgentKind;

    #[test]
    fn joins_candidate_parts() {
        let response = json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "{\"category\":" }, { "text": "\"Science\"}" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        });
        assert_eq!(candidate_text(&response).unwrap(), r#"{"category":"Science"}"#);
    }

    #[test]
    fn missing_candidates_yield_nothing() {
        assert!(candidate_text(&json!({ "promptFeedback": { "blockReason": "SAFETY" } })).is_none());
        assert!(candidate_text(&json!({ "candidates": [{ "content": { "parts": [] } }] })).is_none());
    }

    #[test]
    fn parses_fenced_json() {
        let text = "```json\n{\"category\": \"History\", \"insight\": \"Old.\"}\n```";
        let map = parse_json_object(text).unwrap();
        assert_eq!(map["category"], "History");
    }

    #[test]
    fn parses_json_wrapped_in_prose() {
        let text = "Sure! Here you go: {\"a\": {\"b\": 1}} Hope that helps.";
        let map = parse_json_object(text).unwrap();
        assert_eq!(map["a"]["b"], 1);
    }

    #[test]
    fn rejects_non_objects() {
        assert!(parse_json_object("no json here").is_none());
        assert!(parse_json_object("} backwards {").is_none());
        assert!(parse_json_object("{not valid}").is_none());
    }

    #[tokio::test]
    async fn unreachable_endpoint_yields_none() {
        let generator = VertexGenerator::new(VertexSettings {
            endpoint: Some("http://127.0.0.1:1".to_string()),
            ..VertexSettings::default()
        });
        let prompt = Prompt {
            kind: AgentKind::LearningInsight,
            text: "You are a learning manager AI.".to_string(),
        };
        assert!(generator.generate(&prompt).await.is_none());
    }
}
