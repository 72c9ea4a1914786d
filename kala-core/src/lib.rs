//! Core pipeline for the Kala agents.
//!
//! Every agent runs the same fixed sequence: derive inputs, render a prompt,
//! hand it to a [`TextGenerator`], then normalize whatever came back into a
//! typed result, substituting a deterministic fallback when the backend had
//! nothing usable to say.

mod error;
mod types;
mod metrics;
mod prompt;
mod generation;
mod stub;
mod schema;
mod normalize;
pub mod agents;

// Re-export core types
pub use error::{AgentError, Result};
pub use types::{EngagementData, StrategyResponse, InsightResult, Fact, extract_fact};
pub use metrics::{DerivedMetrics, preprocess};
pub use prompt::{AgentKind, Prompt, PromptPayload, build_prompt};
pub use generation::{GenerationResult, TextGenerator};
pub use stub::StubGenerator;
pub use schema::{OutputSchema, SchemaDefinition};
pub use normalize::{FallbackPolicy, normalize};
pub use agents::{Agent, MarketingStrategyAgent, LearningInsightAgent};
