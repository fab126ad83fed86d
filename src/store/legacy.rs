// SPDX-License-Identifier: MIT OR Apache-2.0

//! Older nested answer layout
//!
//! Earlier exports wrapped the field description in a `path` object:
//!
//! ```json
//! {"answer": "a@b.com", "id": 3, "matchType": "exact",
//!  "path": {"section": "Personal", "fieldName": "Email", "fieldType": "text"}}
//! ```

use serde::{Deserialize, Serialize};

use super::record::{AnswerRecord, AnswerValue, NewAnswer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPath {
    pub section: String,
    pub field_name: String,
    pub field_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAnswer {
    pub answer: AnswerValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Free-form label from the exporting tool. Ignored on import.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<String>,
    pub path: LegacyPath,
}

impl From<LegacyAnswer> for NewAnswer {
    fn from(legacy: LegacyAnswer) -> Self {
        Self {
            section: legacy.path.section,
            field_type: legacy.path.field_type,
            field_name: legacy.path.field_name,
            answer: legacy.answer,
        }
    }
}

impl From<&AnswerRecord> for LegacyAnswer {
    fn from(record: &AnswerRecord) -> Self {
        Self {
            answer: record.answer.clone(),
            id: Some(record.id),
            match_type: None,
            path: LegacyPath {
                section: record.section.clone(),
                field_name: record.field_name.clone(),
                field_type: record.field_type.clone(),
            },
        }
    }
}

/// One entry of an import file, in either layout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ImportEntry {
    Flat(NewAnswer),
    Legacy(LegacyAnswer),
}

impl From<ImportEntry> for NewAnswer {
    fn from(entry: ImportEntry) -> Self {
        match entry {
            ImportEntry::Flat(answer) => answer,
            ImportEntry::Legacy(legacy) => legacy.into(),
        }
    }
}

/// Decode an import document: a JSON array of entries, or an object holding
/// one under `answers`.
pub fn parse_import(value: serde_json::Value) -> Result<Vec<NewAnswer>, serde_json::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Document {
        List(Vec<ImportEntry>),
        Wrapped { answers: Vec<ImportEntry> },
    }

    let entries = match serde_json::from_value::<Document>(value)? {
        Document::List(entries) | Document::Wrapped { answers: entries } => entries,
    };
    Ok(entries.into_iter().map(NewAnswer::from).collect())
}
