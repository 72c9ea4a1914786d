//! Deterministic in-process backend.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::generation::{GenerationResult, TextGenerator};
use crate::prompt::{AgentKind, Prompt};

/// Reference backend that answers from fixed responses.
///
/// Dispatch looks at the prompt text only (case-insensitive), never at the
/// prompt's kind, so a prompt without either phrase gets an empty object.
#[derive(Debug, Clone, Default)]
pub struct StubGenerator;

impl StubGenerator {
    pub fn new() -> Self {
        Self
    }

    fn respond(text: &str) -> GenerationResult {
        let text = text.to_lowercase();

        let response = if text.contains(AgentKind::MarketingStrategy.discriminator()) {
            json!({
                "analysis": "Strong CTR but weak conversion rate.",
                "recommendations": [
                    "Optimize landing page content.",
                    "Use A/B testing for ad creatives.",
                    "Focus on Instagram video posts."
                ],
                "next_best_channel": "Instagram",
                "suggested_content_type": "Short Video Reels"
            })
        } else if text.contains(AgentKind::LearningInsight.discriminator()) {
            json!({
                "category": "History & Culture",
                "insight": "This fact can inspire heritage-themed marketing campaigns."
            })
        } else {
            json!({})
        };

        match response {
            Value::Object(map) => map,
            _ => GenerationResult::new(),
        }
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    fn name(&self) -> &str {
        "stub"
    }

    async fn generate(&self, prompt: &Prompt) -> Option<GenerationResult> {
        debug!(kind = %prompt.kind, "Prompt sent to stub backend:\n{}", prompt.text);
        Some(Self::respond(&prompt.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(kind: AgentKind, text: &str) -> Prompt {
        Prompt { kind, text: text.to_string() }
    }

    #[tokio::test]
    async fn answers_marketing_phrase_in_any_case() {
        let result = StubGenerator::new()
            .generate(&prompt(AgentKind::MarketingStrategy, "You are a MARKETING Strategist AI."))
            .await
            .unwrap();
        assert_eq!(result["next_best_channel"], "Instagram");
        assert_eq!(result["recommendations"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn answers_learning_phrase() {
        let result = StubGenerator::new()
            .generate(&prompt(AgentKind::LearningInsight, "you are a learning manager"))
            .await
            .unwrap();
        assert_eq!(result["category"], "History & Culture");
    }

    #[tokio::test]
    async fn dispatches_on_text_not_kind() {
        let result = StubGenerator::new()
            .generate(&prompt(AgentKind::MarketingStrategy, "a learning manager prompt"))
            .await
            .unwrap();
        assert!(result.contains_key("insight"));
    }

    #[tokio::test]
    async fn unknown_prompt_yields_empty_object() {
        let result = StubGenerator::new()
            .generate(&prompt(AgentKind::LearningInsight, "hello"))
            .await
            .unwrap();
        assert!(result.is_empty());
    }
}
