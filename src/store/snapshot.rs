// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted store layout
//!
//! ```json
//! { "records": [[5, {"section": "...", "fieldType": "...", "fieldName": "...", "answer": "..."}]],
//!   "autoIncrement": 6 }
//! ```
//!
//! Older snapshots name the record list `store`; both spellings are read.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::record::AnswerRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(alias = "store", default)]
    pub records: Vec<(u64, AnswerRecord)>,
    #[serde(default)]
    pub auto_increment: u64,
}

impl Snapshot {
    /// Decode a stored value. Anything unreadable yields `None`.
    pub fn decode(value: serde_json::Value) -> Option<Self> {
        match serde_json::from_value::<Snapshot>(value) {
            Ok(mut snapshot) => {
                snapshot.reconcile();
                Some(snapshot)
            }
            Err(err) => {
                warn!(error = %err, "stored answer snapshot is corrupt, ignoring it");
                None
            }
        }
    }

    /// Make the tuple key authoritative for ids, drop repeated ids, and keep
    /// the counter ahead of every stored id.
    fn reconcile(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.records.retain(|(id, _)| {
            let fresh = seen.insert(*id);
            if !fresh {
                warn!(id, "snapshot repeats a record id, keeping the first one");
            }
            fresh
        });
        for (id, record) in &mut self.records {
            record.id = *id;
        }
        if let Some(max_id) = self.records.iter().map(|(id, _)| *id).max() {
            if self.auto_increment <= max_id {
                warn!(
                    auto_increment = self.auto_increment,
                    max_id, "snapshot counter behind stored ids, advancing it"
                );
                self.auto_increment = max_id + 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_records_and_counter() {
        let snapshot = Snapshot::decode(json!({
            "records": [[5, {"section": "Personal", "fieldType": "text", "fieldName": "Email", "answer": "a@b.com"}]],
            "autoIncrement": 6
        }))
        .expect("snapshot");
        assert_eq!(snapshot.auto_increment, 6);
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.records[0].1.id, 5);
    }

    #[test]
    fn accepts_the_legacy_store_key() {
        let snapshot = Snapshot::decode(json!({
            "store": [[2, {"id": 2, "section": "S", "fieldType": "text", "fieldName": "City", "answer": "Oslo"}]],
            "autoIncrement": 3
        }))
        .expect("snapshot");
        assert_eq!(snapshot.records[0].1.field_name, "City");
    }

    #[test]
    fn counter_is_advanced_past_stored_ids() {
        let snapshot = Snapshot::decode(json!({
            "records": [[9, {"section": "S", "fieldType": "text", "fieldName": "City", "answer": "Oslo"}]],
            "autoIncrement": 4
        }))
        .expect("snapshot");
        assert_eq!(snapshot.auto_increment, 10);
    }

    #[test]
    fn repeated_ids_keep_the_first_record() {
        let snapshot = Snapshot::decode(json!({
            "records": [
                [1, {"section": "S", "fieldType": "text", "fieldName": "City", "answer": "Oslo"}],
                [1, {"section": "S", "fieldType": "text", "fieldName": "Town", "answer": "Bergen"}]
            ],
            "autoIncrement": 2
        }))
        .expect("snapshot");
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.records[0].1.field_name, "City");
    }

    #[test]
    fn corrupt_values_decode_to_none() {
        assert!(Snapshot::decode(json!("garbage")).is_none());
        assert!(Snapshot::decode(json!({"records": [[1, {"fieldName": 3}]]})).is_none());
    }

    #[test]
    fn encodes_with_camel_case_keys() {
        let value = serde_json::to_value(Snapshot::default()).expect("encode");
        assert_eq!(value, json!({"records": [], "autoIncrement": 0}));
    }
}
