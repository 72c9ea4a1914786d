//! Marketing strategy agent.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info_span, Instrument};

use crate::agents::Agent;
use crate::error::Result;
use crate::generation::TextGenerator;
use crate::metrics::preprocess;
use crate::normalize::{normalize, FallbackPolicy};
use crate::prompt::{build_prompt, AgentKind, PromptPayload};
use crate::types::{EngagementData, StrategyResponse};

/// Turns campaign engagement counters into a marketing strategy.
pub struct MarketingStrategyAgent {
    generator: Arc<dyn TextGenerator>,
}

impl MarketingStrategyAgent {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn generate_strategy(&self, data: &EngagementData) -> Result<StrategyResponse> {
        let span = info_span!(
            "agent",
            kind = %self.kind(),
            backend = self.generator.name(),
            campaign_id = %data.campaign_id,
        );

        async {
            let derived = preprocess(&data.metrics);
            debug!(?derived, "Derived metrics");

            let prompt = build_prompt(PromptPayload::MarketingStrategy {
                metrics: &data.metrics,
                derived: &derived,
            })?;

            let raw = self.generator.generate(&prompt).await;

            normalize(raw, data, FallbackPolicy::WhenAbsent, StrategyResponse::fallback_for)
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl Agent for MarketingStrategyAgent {
    type Input = EngagementData;
    type Output = StrategyResponse;

    fn kind(&self) -> AgentKind {
        AgentKind::MarketingStrategy
    }

    async fn run(&self, input: &EngagementData) -> Result<StrategyResponse> {
        self.generate_strategy(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgentError;
    use crate::generation::GenerationResult;
    use crate::prompt::Prompt;
    use crate::stub::StubGenerator;
    use serde_json::json;
    use std::sync::Mutex;

    /// Backend that records prompts and replays a canned answer.
    struct Canned {
        answer: Option<GenerationResult>,
        seen: Mutex<Vec<Prompt>>,
    }

    impl Canned {
        fn new(answer: Option<serde_json::Value>) -> Self {
            Self {
                answer: answer.map(|v| v.as_object().cloned().unwrap()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for Canned {
        fn name(&self) -> &str {
            "canned"
        }

        async fn generate(&self, prompt: &Prompt) -> Option<GenerationResult> {
            self.seen.lock().unwrap().push(prompt.clone());
            self.answer.clone()
        }
    }

    fn sample() -> EngagementData {
        EngagementData {
            campaign_id: "spring-sale".to_string(),
            metrics: [
                ("impressions", 100),
                ("clicks", 20),
                ("likes", 5),
                ("comments", 3),
                ("shares", 2),
                ("conversions", 4),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
            content_type: "Carousel".to_string(),
            channel: "Facebook".to_string(),
            date_range: "2024-03-01..2024-03-31".to_string(),
        }
    }

    #[tokio::test]
    async fn stub_backend_yields_instagram_strategy() {
        let agent = MarketingStrategyAgent::new(Arc::new(StubGenerator::new()));
        let strategy = agent.generate_strategy(&sample()).await.unwrap();

        assert_eq!(strategy.next_best_channel, "Instagram");
        assert_eq!(strategy.suggested_content_type, "Short Video Reels");
        assert_eq!(strategy.analysis, "Strong CTR but weak conversion rate.");
        assert_eq!(strategy.recommendations.len(), 3);
    }

    #[tokio::test]
    async fn repeated_runs_are_identical() {
        let agent = MarketingStrategyAgent::new(Arc::new(StubGenerator::new()));
        let first = serde_json::to_string(&agent.run(&sample()).await.unwrap()).unwrap();
        let second = serde_json::to_string(&agent.run(&sample()).await.unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn absent_output_falls_back_to_input_channel() {
        let agent = MarketingStrategyAgent::new(Arc::new(Canned::new(None)));
        let strategy = agent.generate_strategy(&sample()).await.unwrap();
        assert_eq!(strategy, StrategyResponse::fallback_for(&sample()));
    }

    #[tokio::test]
    async fn empty_output_falls_back() {
        let agent = MarketingStrategyAgent::new(Arc::new(Canned::new(Some(json!({})))));
        let strategy = agent.generate_strategy(&sample()).await.unwrap();
        assert_eq!(strategy.next_best_channel, "Facebook");
        assert_eq!(strategy.recommendations, vec!["Retry later"]);
    }

    #[tokio::test]
    async fn incomplete_output_is_propagated() {
        let backend = Canned::new(Some(json!({"analysis": "", "next_best_channel": ""})));
        let agent = MarketingStrategyAgent::new(Arc::new(backend));
        let err = agent.generate_strategy(&sample()).await.unwrap_err();
        assert!(matches!(err, AgentError::Construction { agent: AgentKind::MarketingStrategy, .. }));
    }

    #[tokio::test]
    async fn prompt_carries_kind_and_derived_metrics() {
        let backend = Arc::new(Canned::new(None));
        let agent = MarketingStrategyAgent::new(backend.clone());
        agent.generate_strategy(&sample()).await.unwrap();

        let seen = backend.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, AgentKind::MarketingStrategy);
        assert_eq!(agent.kind(), seen[0].kind);
        assert!(seen[0].text.contains(r#"{"CTR":0.2,"EngagementRate":0.1,"ConversionRate":0.2}"#));
    }
}
