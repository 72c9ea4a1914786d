//! Prompt templates for the agents.
//!
//! The rendered text is the only channel the backend has for learning what is
//! being asked, so each template carries a fixed phrase identifying its agent.
//! Caller-supplied strings are interpolated verbatim, without escaping.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metrics::DerivedMetrics;

/// Which agent a prompt (and its response) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    MarketingStrategy,
    LearningInsight,
}

impl AgentKind {
    pub fn name(&self) -> &'static str {
        match self {
            AgentKind::MarketingStrategy => "marketing-strategy",
            AgentKind::LearningInsight => "learning-insight",
        }
    }

    /// Lowercase phrase every prompt of this kind contains.
    pub fn discriminator(&self) -> &'static str {
        match self {
            AgentKind::MarketingStrategy => "marketing strategist",
            AgentKind::LearningInsight => "learning manager",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rendered prompt together with the agent that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: AgentKind,
    pub text: String,
}

/// Data a template needs, per agent.
#[derive(Debug, Clone, Copy)]
pub enum PromptPayload<'a> {
    MarketingStrategy {
        metrics: &'a BTreeMap<String, i64>,
        derived: &'a DerivedMetrics,
    },
    LearningInsight {
        fact: &'a str,
    },
}

impl PromptPayload<'_> {
    pub fn kind(&self) -> AgentKind {
        match self {
            PromptPayload::MarketingStrategy { .. } => AgentKind::MarketingStrategy,
            PromptPayload::LearningInsight { .. } => AgentKind::LearningInsight,
        }
    }
}

/// Render the instruction template for the payload's agent.
pub fn build_prompt(payload: PromptPayload<'_>) -> Result<Prompt> {
    let text = match payload {
        PromptPayload::MarketingStrategy { metrics, derived } => {
            format_marketing_strategy(
                &serde_json::to_string(metrics)?,
                &serde_json::to_string(derived)?,
            )
        }
        PromptPayload::LearningInsight { fact } => format_learning_insight(fact),
    };

    Ok(Prompt {
        kind: payload.kind(),
        text,
    })
}

fn format_marketing_strategy(metrics: &str, derived: &str) -> String {
    format!(
        r#"You are a marketing strategist AI. Analyze the following campaign metrics
and suggest improvements.

Engagement Data:
{}

Derived Metrics:
{}

Please suggest:
1. What is working well?
2. What should be improved?
3. Next-step campaign strategies.
4. Best channel & content type to focus on.

Respond in JSON with keys:
analysis, recommendations, next_best_channel, suggested_content_type."#,
        metrics, derived
    )
}

fn format_learning_insight(fact: &str) -> String {
    format!(
        r#"You are a learning manager AI.
Categorize the following fact and provide structured insights.

Fact: "{}"

Respond in JSON with keys:
- category (broad domain, e.g. 'Science', 'History', 'Culture')
- insight (short useful interpretation of the fact)"#,
        fact
    )
}
