//! Error types for the agent pipeline.

use thiserror::Error;

use crate::prompt::AgentKind;

/// Errors an agent run can surface to its caller.
///
/// An absent backend result is never an error; it is always recovered with
/// the agent's fallback value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    /// The backend returned a result that does not fit the agent's output schema
    #[error("{agent} response could not be constructed: {reason}")]
    Construction {
        agent: AgentKind,
        reason: String,
    },

    /// Serialization or deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::SerializationError(err.to_string())
    }
}
