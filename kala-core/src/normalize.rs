//! Maps raw backend output onto typed agent results.

use serde_json::Value;
use tracing::warn;

use crate::error::{AgentError, Result};
use crate::generation::GenerationResult;
use crate::schema::OutputSchema;

/// When a backend result counts as "nothing usable".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Absent or an empty object
    WhenAbsent,
    /// Absent, an empty object, or an object whose values are all falsy
    /// (null, false, 0, "", [], {}). Broader than plain object truthiness,
    /// where any non-empty object counts as a value.
    WhenFalsy,
}

impl FallbackPolicy {
    pub fn should_fallback(&self, raw: Option<&GenerationResult>) -> bool {
        match raw {
            None => true,
            Some(map) if map.is_empty() => true,
            Some(map) => match self {
                FallbackPolicy::WhenAbsent => false,
                FallbackPolicy::WhenFalsy => map.values().all(is_falsy),
            },
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Turn a backend result into the agent's typed output.
///
/// Unusable results (per `policy`) are replaced by `fallback(input)`. A usable
/// result must satisfy the output schema in full; there is no per-field
/// fallback, so anything short of that is a construction error.
pub fn normalize<T, I, F>(
    raw: Option<GenerationResult>,
    input: &I,
    policy: FallbackPolicy,
    fallback: F,
) -> Result<T>
where
    T: OutputSchema,
    I: ?Sized,
    F: FnOnce(&I) -> T,
{
    let agent = T::KIND;

    if policy.should_fallback(raw.as_ref()) {
        warn!(%agent, "Backend returned no usable output, using fallback");
        return Ok(fallback(input));
    }

    let value = Value::Object(raw.unwrap_or_default());

    T::schema()
        .validate(&value)
        .map_err(|violations| AgentError::Construction {
            agent,
            reason: violations.join("; "),
        })?;

    serde_json::from_value(value).map_err(|e| AgentError::Construction {
        agent,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::AgentKind;
    use crate::types::{InsightResult, StrategyResponse};
    use serde_json::json;

    fn object(value: Value) -> GenerationResult {
        value.as_object().cloned().unwrap()
    }

    fn insight_fallback(_: &()) -> InsightResult {
        InsightResult::fallback()
    }

    #[test]
    fn absent_result_falls_back() {
        let result: InsightResult =
            normalize(None, &(), FallbackPolicy::WhenAbsent, insight_fallback).unwrap();
        assert_eq!(result, InsightResult::fallback());
    }

    #[test]
    fn empty_result_falls_back_under_both_policies() {
        for policy in [FallbackPolicy::WhenAbsent, FallbackPolicy::WhenFalsy] {
            let result: InsightResult =
                normalize(Some(GenerationResult::new()), &(), policy, insight_fallback).unwrap();
            assert_eq!(result, InsightResult::fallback());
        }
    }

    #[test]
    fn falsy_values_only_fall_back_when_lenient() {
        let raw = object(json!({"category": "", "insight": null}));

        let lenient: InsightResult =
            normalize(Some(raw.clone()), &(), FallbackPolicy::WhenFalsy, insight_fallback).unwrap();
        assert_eq!(lenient, InsightResult::fallback());

        let strict: Result<InsightResult> =
            normalize(Some(raw), &(), FallbackPolicy::WhenAbsent, insight_fallback);
        assert!(matches!(
            strict,
            Err(AgentError::Construction { agent: AgentKind::LearningInsight, .. })
        ));
    }

    #[test]
    fn falsy_check_covers_every_json_type() {
        let raw = object(json!({"a": 0, "b": false, "c": [], "d": {}, "e": 0.0}));
        assert!(FallbackPolicy::WhenFalsy.should_fallback(Some(&raw)));
        assert!(!FallbackPolicy::WhenAbsent.should_fallback(Some(&raw)));

        let raw = object(json!({"a": 0, "b": "x"}));
        assert!(!FallbackPolicy::WhenFalsy.should_fallback(Some(&raw)));
    }

    #[test]
    fn complete_result_maps_directly() {
        let raw = object(json!({
            "analysis": "ok",
            "recommendations": ["a", "b"],
            "next_best_channel": "Email",
            "suggested_content_type": "Newsletter",
            "extra": true
        }));
        let result: StrategyResponse =
            normalize(Some(raw), &(), FallbackPolicy::WhenAbsent, |_: &()| unreachable!()).unwrap();
        assert_eq!(result.next_best_channel, "Email");
        assert_eq!(result.recommendations, vec!["a", "b"]);
    }

    #[test]
    fn partial_result_is_a_construction_error() {
        let raw = object(json!({"analysis": "only this"}));
        let err = normalize::<StrategyResponse, _, _>(
            Some(raw),
            &(),
            FallbackPolicy::WhenAbsent,
            |_: &()| unreachable!(),
        )
        .unwrap_err();

        match err {
            AgentError::Construction { agent, reason } => {
                assert_eq!(agent, AgentKind::MarketingStrategy);
                assert!(reason.contains("recommendations"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
