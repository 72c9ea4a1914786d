//! Request handlers for the agent routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kala_core::{Agent, StrategyResponse, EngagementData, InsightResult};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::{server::AppState, Result, ServiceError};

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Agent(_) | ServiceError::InvalidOptions(_) | ServiceError::ServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            info!("Rejected request: {}", self);
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Liveness probe
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "AI Agents are running 🚀" }))
}

/// Generate a marketing strategy from engagement data
pub async fn marketing_strategy(
    State(state): State<AppState>,
    payload: std::result::Result<Json<EngagementData>, JsonRejection>,
) -> Result<Json<StrategyResponse>> {
    let Json(data) = payload.map_err(|e| ServiceError::Validation(e.body_text()))?;

    let strategy = run_agent(state.marketing.as_ref(), &data).await?;

    Ok(Json(strategy))
}

/// Extract a structured insight from a fact
pub async fn learning_insight(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<InsightResult>> {
    let Json(body) = payload.map_err(|e| ServiceError::Validation(e.body_text()))?;

    let fact = match body {
        Value::Object(map) => map,
        other => {
            return Err(ServiceError::Validation(format!(
                "Expected a JSON object, got {}",
                json_type(&other)
            )));
        }
    };

    let insight = run_agent(state.insight.as_ref(), &fact).await?;

    Ok(Json(insight))
}

async fn run_agent<A: Agent>(agent: &A, input: &A::Input) -> Result<A::Output> {
    let output = agent.run(input).await?;
    info!(agent = %agent.kind(), "Agent produced a result");
    Ok(output)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
