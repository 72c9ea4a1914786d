//! Derived engagement ratios.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ratios computed from raw counters, each rounded to three decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    #[serde(rename = "CTR")]
    pub ctr: f64,

    #[serde(rename = "EngagementRate")]
    pub engagement_rate: f64,

    #[serde(rename = "ConversionRate")]
    pub conversion_rate: f64,
}

/// Compute CTR, engagement rate and conversion rate from raw counters.
///
/// Missing counters read as zero and a zero denominator yields a zero ratio.
/// Negative counters are not rejected; they flow through the arithmetic.
pub fn preprocess(metrics: &BTreeMap<String, i64>) -> DerivedMetrics {
    // f64 so summed counters cannot overflow.
    let count = |name: &str| metrics.get(name).copied().unwrap_or(0) as f64;

    let impressions = count("impressions");
    let clicks = count("clicks");
    let likes = count("likes");
    let comments = count("comments");
    let shares = count("shares");
    let conversions = count("conversions");

    DerivedMetrics {
        ctr: round3(ratio(clicks, impressions)),
        engagement_rate: round3(ratio(likes + comments + shares, impressions)),
        conversion_rate: round3(ratio(conversions, clicks)),
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

// Half away from zero.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
