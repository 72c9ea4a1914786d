//! Learning insight agent.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info_span, Instrument};

use crate::agents::Agent;
use crate::error::Result;
use crate::generation::TextGenerator;
use crate::normalize::{normalize, FallbackPolicy};
use crate::prompt::{build_prompt, AgentKind, PromptPayload};
use crate::types::{extract_fact, Fact, InsightResult};

/// Categorizes a free-form fact.
pub struct LearningInsightAgent {
    generator: Arc<dyn TextGenerator>,
}

impl LearningInsightAgent {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Falls back on any all-falsy answer, not just an absent one.
    pub async fn extract_insight(&self, data: &Fact) -> Result<InsightResult> {
        let span = info_span!(
            "agent",
            kind = %self.kind(),
            backend = self.generator.name(),
        );

        async {
            let fact = extract_fact(data);
            let prompt = build_prompt(PromptPayload::LearningInsight { fact: &fact })?;

            let raw = self.generator.generate(&prompt).await;

            normalize(raw, data, FallbackPolicy::WhenFalsy, |_: &Fact| InsightResult::fallback())
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl Agent for LearningInsightAgent {
    type Input = Fact;
    type Output = InsightResult;

    fn kind(&self) -> AgentKind {
        AgentKind::LearningInsight
    }

    async fn run(&self, input: &Fact) -> Result<InsightResult> {
        self.extract_insight(input).await
    }
}
