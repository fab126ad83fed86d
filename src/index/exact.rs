// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw field name -> record id buckets

use std::collections::HashMap;

/// Maps an un-normalized field name to the ids currently stored under it.
///
/// Buckets keep insertion order and never contain duplicates. Empty buckets
/// are dropped.
#[derive(Debug, Default, Clone)]
pub struct ExactIndex {
    buckets: HashMap<String, Vec<u64>>,
}

impl ExactIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, id: u64) {
        let ids = self.buckets.entry(name.to_string()).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    pub fn delete(&mut self, name: &str, id: u64) {
        if let Some(ids) = self.buckets.get_mut(name) {
            ids.retain(|existing| *existing != id);
            if ids.is_empty() {
                self.buckets.remove(name);
            }
        }
    }

    pub fn get(&self, name: &str) -> &[u64] {
        self.buckets.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct names with at least one id.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
