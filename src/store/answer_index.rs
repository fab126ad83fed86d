// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record collection with its exact and lexical indices
//!
//! All writes go through [`AnswerIndex::insert`], [`AnswerIndex::remove`] and
//! [`AnswerIndex::clear`]. Each touches the lexical index first (the only
//! fallible step) and only then updates the records and exact buckets, so a
//! failed write leaves every structure as it was.

use std::collections::HashMap;

use crate::errors::StoreError;
use crate::index::{ExactIndex, LexicalHit, LexicalIndex};

use super::record::{AnswerRecord, NewAnswer};

#[derive(Debug)]
pub struct AnswerIndex {
    records: HashMap<u64, AnswerRecord>,
    // Insertion order of live ids.
    order: Vec<u64>,
    exact: ExactIndex,
    lexical: LexicalIndex,
}

impl AnswerIndex {
    pub fn empty() -> Result<Self, StoreError> {
        Ok(Self {
            records: HashMap::new(),
            order: Vec::new(),
            exact: ExactIndex::new(),
            lexical: LexicalIndex::in_memory()?,
        })
    }

    /// Build from records in their stored order, committing the lexical
    /// index once. Ids must be distinct.
    pub fn from_records(records: Vec<AnswerRecord>) -> Result<Self, StoreError> {
        let mut index = Self::empty()?;
        index
            .lexical
            .rebuild(records.iter().map(|r| (r.id, r.field_name.as_str())))?;
        for record in records {
            index.exact.add(&record.field_name, record.id);
            index.order.push(record.id);
            index.records.insert(record.id, record);
        }
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&AnswerRecord> {
        self.records.get(&id)
    }

    /// Records in insertion order. A replaced record moves to the end.
    pub fn iter(&self) -> impl Iterator<Item = &AnswerRecord> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Insert `record`, replacing any record that holds the same id.
    pub fn insert(&mut self, record: AnswerRecord) -> Result<(), StoreError> {
        self.lexical.upsert(record.id, &record.field_name)?;

        if let Some(old) = self.records.remove(&record.id) {
            self.exact.delete(&old.field_name, old.id);
            self.order.retain(|id| *id != old.id);
        }
        self.exact.add(&record.field_name, record.id);
        self.order.push(record.id);
        self.records.insert(record.id, record);
        Ok(())
    }

    pub fn remove(&mut self, id: u64) -> Result<Option<AnswerRecord>, StoreError> {
        if !self.records.contains_key(&id) {
            return Ok(None);
        }
        self.lexical.remove(id)?;

        let removed = self.records.remove(&id);
        if let Some(record) = &removed {
            self.exact.delete(&record.field_name, id);
            self.order.retain(|existing| *existing != id);
        }
        Ok(removed)
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.lexical.rebuild(std::iter::empty::<(u64, &str)>())?;
        self.records.clear();
        self.order.clear();
        self.exact = ExactIndex::new();
        Ok(())
    }

    /// Ids stored under exactly `field_name`, oldest first.
    pub fn exact_ids(&self, field_name: &str) -> &[u64] {
        self.exact.get(field_name)
    }

    pub fn lexical_hits(&self, query: &str) -> tantivy::Result<Vec<LexicalHit>> {
        self.lexical.search(query)
    }

    /// An existing record with the same name, section, type and answer.
    pub fn find_duplicate(&self, answer: &NewAnswer) -> Option<&AnswerRecord> {
        self.exact_ids(&answer.field_name)
            .iter()
            .filter_map(|id| self.records.get(id))
            .find(|record| record.same_content_as(answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, name: &str, answer: &str) -> AnswerRecord {
        AnswerRecord::from_new(id, NewAnswer::new("Personal", "text", name, answer))
    }

    fn lexical_ids(index: &AnswerIndex, query: &str) -> Vec<u64> {
        index
            .lexical_hits(query)
            .expect("lexical")
            .into_iter()
            .map(|h| h.id)
            .collect()
    }

    #[test]
    fn insert_updates_every_structure() {
        let mut index = AnswerIndex::empty().expect("index");
        index.insert(record(1, "Email", "a@b.com")).expect("insert");
        assert_eq!(index.len(), 1);
        assert_eq!(index.exact_ids("Email"), &[1]);
        assert_eq!(lexical_ids(&index, "email"), vec![1]);
    }

    #[test]
    fn replacing_an_id_moves_it_between_names() {
        let mut index = AnswerIndex::empty().expect("index");
        index.insert(record(1, "Email", "a@b.com")).expect("insert");
        index.insert(record(2, "Phone", "555")).expect("insert");
        index.insert(record(1, "Mobile", "555-1")).expect("replace");

        assert!(index.exact_ids("Email").is_empty());
        assert_eq!(index.exact_ids("Mobile"), &[1]);
        assert!(lexical_ids(&index, "email").is_empty());
        assert_eq!(lexical_ids(&index, "mobile"), vec![1]);
        let order: Vec<u64> = index.iter().map(|r| r.id).collect();
        assert_eq!(order, vec![2, 1]);
    }

    #[test]
    fn remove_prunes_every_structure() {
        let mut index = AnswerIndex::from_records(vec![
            record(1, "Email", "a@b.com"),
            record(2, "Email", "c@d.com"),
        ])
        .expect("index");

        let removed = index.remove(1).expect("remove");
        assert_eq!(removed.map(|r| r.id), Some(1));
        assert_eq!(index.exact_ids("Email"), &[2]);
        assert_eq!(lexical_ids(&index, "email"), vec![2]);
        assert!(index.get(1).is_none());

        assert!(index.remove(1).expect("remove again").is_none());
    }

    #[test]
    fn find_duplicate_compares_content_deeply() {
        let index = AnswerIndex::from_records(vec![record(4, "City", "Oslo")]).expect("index");
        let same = NewAnswer::new("Personal", "text", "City", "Oslo");
        let other_answer = NewAnswer::new("Personal", "text", "City", "Bergen");
        let other_type = NewAnswer::new("Personal", "textarea", "City", "Oslo");
        assert_eq!(index.find_duplicate(&same).map(|r| r.id), Some(4));
        assert!(index.find_duplicate(&other_answer).is_none());
        assert!(index.find_duplicate(&other_type).is_none());
    }

    #[test]
    fn clear_empties_everything() {
        let mut index =
            AnswerIndex::from_records(vec![record(1, "Email", "a@b.com")]).expect("index");
        index.clear().expect("clear");
        assert!(index.is_empty());
        assert!(index.exact_ids("Email").is_empty());
        assert!(lexical_ids(&index, "email").is_empty());
    }
}
