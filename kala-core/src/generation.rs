//! Contract between the agents and a text generation backend.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::prompt::Prompt;

/// Structured output of a backend call: a JSON object.
pub type GenerationResult = Map<String, Value>;

/// A backend that turns a prompt into structured output.
///
/// `None` (or an empty object) is the only failure signal; implementations
/// log their own transport or parse errors and collapse them into it. No
/// timeout or retry is applied on this side of the boundary.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Backend name, used in log fields
    fn name(&self) -> &str;

    /// Send the prompt and return whatever structured output came back
    async fn generate(&self, prompt: &Prompt) -> Option<GenerationResult>;
}
