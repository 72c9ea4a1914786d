//! Output schemas for agent results.
//!
//! Each agent output declares the JSON Schema a backend result must satisfy
//! before it is mapped onto the typed value.

use jsonschema::JSONSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::prompt::AgentKind;
use crate::types::{InsightResult, StrategyResponse};

/// A JSON Schema document describing one output shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub schema: Value,
}

impl SchemaDefinition {
    pub fn new(schema: Value) -> Self {
        Self { schema }
    }

    /// Check a value against the schema, collecting every violation.
    pub fn validate(&self, value: &Value) -> Result<(), Vec<String>> {
        let compiled = JSONSchema::compile(&self.schema)
            .map_err(|e| vec![format!("invalid schema: {}", e)])?;

        compiled
            .validate(value)
            .map_err(|errors| errors.map(|e| e.to_string()).collect())
    }
}

/// A typed agent output with a declared schema.
pub trait OutputSchema: DeserializeOwned {
    /// Agent the output belongs to
    const KIND: AgentKind;

    fn schema() -> SchemaDefinition;
}

impl OutputSchema for StrategyResponse {
    const KIND: AgentKind = AgentKind::MarketingStrategy;

    fn schema() -> SchemaDefinition {
        SchemaDefinition::new(json!({
            "type": "object",
            "properties": {
                "analysis": { "type": "string" },
                "recommendations": { "type": "array", "items": { "type": "string" } },
                "next_best_channel": { "type": "string" },
                "suggested_content_type": { "type": "string" }
            },
            "required": ["analysis", "recommendations", "next_best_channel", "suggested_content_type"]
        }))
    }
}

impl OutputSchema for InsightResult {
    const KIND: AgentKind = AgentKind::LearningInsight;

    fn schema() -> SchemaDefinition {
        SchemaDefinition::new(json!({
            "type": "object",
            "properties": {
                "category": { "type": "string" },
                "insight": { "type": "string" }
            },
            "required": ["category", "insight"]
        }))
    }
}
