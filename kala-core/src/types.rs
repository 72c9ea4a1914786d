//! Data model shared by the agents and the HTTP surface.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw engagement counters for a single campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementData {
    /// Campaign identifier
    pub campaign_id: String,

    /// Named counters (impressions, clicks, likes, comments, shares, conversions)
    pub metrics: BTreeMap<String, i64>,

    /// Kind of content the campaign ran
    pub content_type: String,

    /// Channel the campaign ran on
    pub channel: String,

    /// Free-form reporting window
    pub date_range: String,
}

/// Marketing strategy produced by the marketing agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResponse {
    pub analysis: String,
    pub recommendations: Vec<String>,
    pub next_best_channel: String,
    pub suggested_content_type: String,
}

impl StrategyResponse {
    /// The value returned when the backend produced nothing usable.
    ///
    /// Channel and content type echo the caller's input.
    pub fn fallback_for(data: &EngagementData) -> Self {
        Self {
            analysis: "Could not generate AI analysis.".to_string(),
            recommendations: vec!["Retry later".to_string()],
            next_best_channel: data.channel.clone(),
            suggested_content_type: data.content_type.clone(),
        }
    }
}

/// Categorized insight produced by the learning agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightResult {
    pub category: String,
    pub insight: String,
}

impl InsightResult {
    pub fn fallback() -> Self {
        Self {
            category: "Unknown".to_string(),
            insight: "No insight generated".to_string(),
        }
    }
}

/// Free-form fact payload. Only the `fact` key is read.
pub type Fact = Map<String, Value>;

/// Pull the fact text out of a free-form payload.
///
/// Absent or null reads as an empty string; strings are taken verbatim and
/// any other JSON value is rendered as compact JSON.
pub fn extract_fact(data: &Fact) -> String {
    match data.get("fact") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
