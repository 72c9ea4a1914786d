use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default project placeholder
pub const DEFAULT_PROJECT_ID: &str = "your-project-id";

/// Default region
pub const DEFAULT_LOCATION: &str = "us-central1";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-1.0-pro";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Default maximum tokens value: 1024
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Connection settings for the Vertex AI backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexSettings {
    /// Google Cloud project hosting the model
    pub project_id: String,
    /// Region of the Vertex AI endpoint
    pub location: String,
    /// Publisher model name
    pub model: String,
    /// OAuth access token sent as a bearer token
    pub access_token: Option<String>,
    /// Base URL override (defaults to the regional aiplatform host)
    pub endpoint: Option<String>,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for VertexSettings {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            model: DEFAULT_MODEL.to_string(),
            access_token: None,
            endpoint: None,
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl VertexSettings {
    /// Full URL of the model's generateContent method.
    pub fn generate_content_url(&self) -> String {
        let base_url = match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://{}-aiplatform.googleapis.com", self.location),
        };

        // Remove trailing slash if present
        let base_url = base_url.trim_end_matches('/');

        format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            base_url, self.project_id, self.location, self.model
        )
    }

    /// Whether the model honours `responseMimeType`. Gemini 1.0 models reject it.
    pub fn supports_json_mode(&self) -> bool {
        let model = self.model.as_str();
        model.starts_with("gemini-")
            && !model.starts_with("gemini-1.0")
            && !model.starts_with("gemini-pro")
    }

    /// The `generationConfig` block sent with every request.
    pub fn generation_config(&self) -> Value {
        let mut config = json!({
            "temperature": self.temperature,
            "maxOutputTokens": self.max_output_tokens
        });

        if self.supports_json_mode() {
            config["responseMimeType"] = json!("application/json");
        }

        config
    }
}
