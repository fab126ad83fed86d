// SPDX-License-Identifier: MIT OR Apache-2.0

//! Answer records, search inputs and match annotations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AnswerError;

/// A stored answer value: plain text or a structured JSON document.
///
/// Values are compared by deep equality and never inspected by matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Structured(serde_json::Value),
}

impl AnswerValue {
    /// Keep `input` as text unless it looks like a JSON object or array and
    /// parses as one.
    pub fn parse_lenient(input: &str) -> Self {
        let trimmed = input.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(input) {
                return Self::from(value);
            }
        }
        Self::Text(input.to_string())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured(_) => None,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<serde_json::Value> for AnswerValue {
    /// JSON strings become [`AnswerValue::Text`] so equal answers compare equal
    /// no matter how they were built.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Self::Text(text),
            other => Self::Structured(other),
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Structured(value) => write!(f, "{value}"),
        }
    }
}

/// An answer that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnswer {
    pub section: String,
    pub field_type: String,
    pub field_name: String,
    pub answer: AnswerValue,
}

impl NewAnswer {
    pub fn new(
        section: impl Into<String>,
        field_type: impl Into<String>,
        field_name: impl Into<String>,
        answer: impl Into<AnswerValue>,
    ) -> Self {
        Self {
            section: section.into(),
            field_type: field_type.into(),
            field_name: field_name.into(),
            answer: answer.into(),
        }
    }

    /// Reject answers whose section, field type or field name is blank.
    pub fn validate(&self) -> Result<(), AnswerError> {
        let required = [
            ("section", &self.section),
            ("field type", &self.field_type),
            ("field name", &self.field_name),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AnswerError::MissingField { field });
            }
        }
        Ok(())
    }
}

/// A stored answer with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    /// Snapshots key records by id, so an embedded id may be absent.
    #[serde(default)]
    pub id: u64,
    pub section: String,
    pub field_type: String,
    pub field_name: String,
    pub answer: AnswerValue,
}

impl AnswerRecord {
    pub fn from_new(id: u64, answer: NewAnswer) -> Self {
        Self {
            id,
            section: answer.section,
            field_type: answer.field_type,
            field_name: answer.field_name,
            answer: answer.answer,
        }
    }

    /// Deep equality on everything but the id.
    pub fn same_content_as(&self, other: &NewAnswer) -> bool {
        self.field_name == other.field_name
            && self.section == other.section
            && self.field_type == other.field_type
            && self.answer == other.answer
    }
}

impl From<AnswerRecord> for NewAnswer {
    fn from(record: AnswerRecord) -> Self {
        Self {
            section: record.section,
            field_type: record.field_type,
            field_name: record.field_name,
            answer: record.answer,
        }
    }
}

/// Description of a form field to find answers for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPath {
    pub section: String,
    pub field_type: String,
    pub field_name: String,
    /// Page the field was seen on. Not used for matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl FieldPath {
    pub fn new(
        section: impl Into<String>,
        field_type: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            field_type: field_type.into(),
            field_name: field_name.into(),
            page: None,
        }
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }
}

/// Which strategy produced a search result, with its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "score", rename_all = "lowercase")]
pub enum MatchType {
    /// Field name equal to the query byte for byte.
    Exact,
    /// BM25 relevance from the lexical index.
    Similar(f32),
    /// Normalized edit-distance similarity, `search` threshold.
    Fuzzy(f64),
    /// Normalized edit-distance similarity, exploratory threshold.
    Probable(f64),
}

impl MatchType {
    pub fn score(&self) -> Option<f64> {
        match *self {
            Self::Exact => None,
            Self::Similar(score) => Some(f64::from(score)),
            Self::Fuzzy(score) | Self::Probable(score) => Some(score),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact)
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Similar(score) => write!(f, "similar:{score}"),
            Self::Fuzzy(score) => write!(f, "fuzzy:{score:.3}"),
            Self::Probable(score) => write!(f, "probable:{score:.3}"),
        }
    }
}

/// A record returned by a search, annotated with how it matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredAnswer {
    #[serde(flatten)]
    pub record: AnswerRecord,
    pub match_type: MatchType,
}

impl ScoredAnswer {
    pub fn new(record: AnswerRecord, match_type: MatchType) -> Self {
        Self { record, match_type }
    }

    pub fn id(&self) -> u64 {
        self.record.id
    }
}
