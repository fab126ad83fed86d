// SPDX-License-Identifier: MIT OR Apache-2.0

//! Autofill confidence derived from the best search result

use serde::Serialize;

use crate::store::{MatchType, ScoredAnswer};

/// Below this confidence a caller should ask for a suggestion instead of
/// filling the field.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Confidence {
    pub has_answer: bool,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<ScoredAnswer>,
}

impl Confidence {
    /// Score the first (best) element of a `search` result.
    pub fn from_results(results: &[ScoredAnswer]) -> Self {
        let Some(best) = results.first() else {
            return Self {
                has_answer: false,
                confidence: 0.0,
                answer: None,
            };
        };
        let confidence = match best.match_type {
            MatchType::Exact => 1.0,
            MatchType::Similar(score) => f64::from(score).clamp(0.0, 1.0),
            MatchType::Fuzzy(_) | MatchType::Probable(_) => 0.0,
        };
        Self {
            has_answer: true,
            confidence,
            answer: Some(best.clone()),
        }
    }

    pub fn needs_suggestion(&self, threshold: f64) -> bool {
        !self.has_answer || self.confidence < threshold
    }
}
