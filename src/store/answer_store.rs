// SPDX-License-Identifier: MIT OR Apache-2.0

//! The answer store: owned records, identity, persistence and search
//!
//! A store starts [`Unloaded`](StoreState::Unloaded) and becomes loaded once,
//! through [`AnswerStore::load`]. Mutations before that fail with
//! [`StoreError::NotLoaded`]; reads return nothing.
//!
//! Persistence writes the full snapshot after every mutation. The in-memory
//! change stands even if that write fails; [`PersistPolicy`] decides whether
//! the failure is logged or returned.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::confidence::Confidence;
use crate::errors::StoreError;
use crate::matching::levenshtein::{FUZZY_THRESHOLD, PROBABLE_THRESHOLD};
use crate::matching::{rank, FieldTypeRules};

use super::answer_index::AnswerIndex;
use super::record::{AnswerRecord, FieldPath, MatchType, NewAnswer, ScoredAnswer};
use super::snapshot::Snapshot;
use super::storage::Storage;

/// Storage key used when none is configured.
pub const DEFAULT_STORE_NAME: &str = "answers";

/// Maximum number of results returned by [`AnswerStore::search`].
pub const SEARCH_LIMIT: usize = 10;

/// Default result count for [`AnswerStore::search_probable`].
pub const DEFAULT_PROBABLE_LIMIT: usize = 5;

enum StoreState {
    Unloaded,
    Loaded(LoadedState),
}

struct LoadedState {
    index: AnswerIndex,
    auto_increment: u64,
}

impl LoadedState {
    /// Stage `answer` in memory unless an identical record is already stored.
    fn add(&mut self, answer: NewAnswer, id: Option<u64>) -> Result<AddOutcome, StoreError> {
        if let Some(existing) = self.index.find_duplicate(&answer) {
            debug!(
                id = existing.id,
                field_name = %existing.field_name,
                "found existing answer, returning it"
            );
            return Ok(AddOutcome::Existing(existing.clone()));
        }
        let id = id.unwrap_or(self.auto_increment);
        self.put(AnswerRecord::from_new(id, answer))
            .map(AddOutcome::Created)
    }

    /// Store `record` under its id, replacing whatever held that id.
    fn put(&mut self, record: AnswerRecord) -> Result<AnswerRecord, StoreError> {
        self.index.insert(record.clone())?;
        self.auto_increment = self.auto_increment.max(record.id.saturating_add(1));
        Ok(record)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            records: self.index.iter().map(|r| (r.id, r.clone())).collect(),
            auto_increment: self.auto_increment,
        }
    }
}

/// How mutations treat a failed write to storage.
///
/// Either way the in-memory change stands; there is no rollback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PersistPolicy {
    /// Log the failure and report success.
    #[default]
    BestEffort,
    /// Return the failure as [`StoreError::Storage`].
    Required,
}

/// Outcome of [`AnswerStore::add_entry`].
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// The answer was stored.
    Created(AnswerRecord),
    /// An identical answer was already stored; nothing changed.
    Existing(AnswerRecord),
}

impl AddOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn record(&self) -> &AnswerRecord {
        match self {
            Self::Created(record) | Self::Existing(record) => record,
        }
    }

    pub fn into_record(self) -> AnswerRecord {
        match self {
            Self::Created(record) | Self::Existing(record) => record,
        }
    }
}

/// Outcome of [`AnswerStore::import`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Answers stored under a new id.
    pub added: usize,
    /// Answers identical to a stored one.
    pub duplicates: usize,
    /// Answers failing validation.
    pub rejected: usize,
}

/// Answer store bound to one key of a [`Storage`] backend.
pub struct AnswerStore {
    name: String,
    storage: Arc<dyn Storage>,
    field_types: FieldTypeRules,
    persist_policy: PersistPolicy,
    state: StoreState,
}

impl std::fmt::Debug for AnswerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerStore")
            .field("name", &self.name)
            .field("loaded", &self.is_loaded())
            .field("len", &self.len())
            .field("persist_policy", &self.persist_policy)
            .finish_non_exhaustive()
    }
}

impl AnswerStore {
    pub fn new(name: impl Into<String>, storage: Arc<dyn Storage>) -> Self {
        Self {
            name: name.into(),
            storage,
            field_types: FieldTypeRules::default(),
            persist_policy: PersistPolicy::default(),
            state: StoreState::Unloaded,
        }
    }

    /// Use `rules` instead of the built-in field-type groups.
    pub fn with_field_types(mut self, rules: FieldTypeRules) -> Self {
        self.field_types = rules;
        self
    }

    pub fn with_persist_policy(mut self, policy: PersistPolicy) -> Self {
        self.persist_policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, StoreState::Loaded(_))
    }

    fn loaded(&self) -> Option<&LoadedState> {
        match &self.state {
            StoreState::Loaded(state) => Some(state),
            StoreState::Unloaded => None,
        }
    }

    fn loaded_mut(&mut self) -> Result<&mut LoadedState, StoreError> {
        match &mut self.state {
            StoreState::Loaded(state) => Ok(state),
            StoreState::Unloaded => Err(StoreError::NotLoaded {
                name: self.name.clone(),
            }),
        }
    }

    /// Hydrate from storage and rebuild both indices.
    ///
    /// A missing or malformed snapshot starts an empty store. A storage
    /// backend failure is returned and the store stays unloaded, so a later
    /// write cannot clobber data that merely failed to read.
    #[instrument(skip(self), fields(store = %self.name))]
    pub async fn load(&mut self) -> Result<(), StoreError> {
        if self.is_loaded() {
            return Err(StoreError::AlreadyLoaded {
                name: self.name.clone(),
            });
        }

        let snapshot = match self.storage.get(&self.name).await? {
            Some(value) => Snapshot::decode(value).unwrap_or_default(),
            None => {
                info!("no existing data found, starting fresh");
                Snapshot::default()
            }
        };

        let auto_increment = snapshot.auto_increment;
        let records: Vec<AnswerRecord> = snapshot.records.into_iter().map(|(_, r)| r).collect();
        let index = AnswerIndex::from_records(records)?;
        info!(records = index.len(), auto_increment, "answer store loaded");

        self.state = StoreState::Loaded(LoadedState {
            index,
            auto_increment,
        });
        Ok(())
    }

    /// Write the full snapshot to storage.
    pub async fn persist(&self) -> Result<(), StoreError> {
        let Some(state) = self.loaded() else {
            return Err(StoreError::NotLoaded {
                name: self.name.clone(),
            });
        };
        let snapshot = state.snapshot();
        debug!(
            store = %self.name,
            records = snapshot.records.len(),
            auto_increment = snapshot.auto_increment,
            "persisting answer store"
        );
        let value = serde_json::to_value(&snapshot).map_err(crate::errors::StorageError::from)?;
        self.storage.set(&self.name, value).await?;
        Ok(())
    }

    /// Persist after a mutation according to the store's [`PersistPolicy`].
    async fn persist_after_mutation(&self) -> Result<(), StoreError> {
        match self.persist().await {
            Ok(()) => Ok(()),
            Err(err) if self.persist_policy == PersistPolicy::BestEffort => {
                warn!(store = %self.name, error = %err, "failed to persist answer store");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Store `answer`, or return the identical record already stored.
    ///
    /// A duplicate (same field name, section, field type and answer) is
    /// returned unchanged whether or not `id` is given. Otherwise the answer
    /// is stored under `id`, replacing any record holding it, or under the
    /// next auto-increment id.
    pub async fn add(
        &mut self,
        answer: NewAnswer,
        id: Option<u64>,
    ) -> Result<AnswerRecord, StoreError> {
        self.add_entry(answer, id).await.map(AddOutcome::into_record)
    }

    /// [`add`](Self::add), telling a stored answer from an existing one.
    pub async fn add_entry(
        &mut self,
        answer: NewAnswer,
        id: Option<u64>,
    ) -> Result<AddOutcome, StoreError> {
        let outcome = self.loaded_mut()?.add(answer, id)?;
        if let AddOutcome::Created(record) = &outcome {
            info!(
                id = record.id,
                field_name = %record.field_name,
                total = self.len(),
                "answer added to store"
            );
            self.persist_after_mutation().await?;
        }
        Ok(outcome)
    }

    pub fn get(&self, id: u64) -> Option<&AnswerRecord> {
        self.loaded().and_then(|state| state.index.get(id))
    }

    /// Remove the record with `id`. Returns whether one was removed.
    pub async fn delete(&mut self, id: u64) -> Result<bool, StoreError> {
        let removed = self.loaded_mut()?.index.remove(id)?;
        match removed {
            Some(record) => {
                info!(
                    id,
                    field_name = %record.field_name,
                    remaining = self.len(),
                    "answer deleted from store"
                );
                self.persist_after_mutation().await?;
                Ok(true)
            }
            None => {
                warn!(id, "answer not found for deletion");
                Ok(false)
            }
        }
    }

    /// Replace the record stored under `record.id` (or insert it).
    ///
    /// Duplicate detection does not apply.
    pub async fn update(&mut self, record: AnswerRecord) -> Result<AnswerRecord, StoreError> {
        let stored = self.loaded_mut()?.put(record)?;
        info!(id = stored.id, field_name = %stored.field_name, "answer updated in store");
        self.persist_after_mutation().await?;
        Ok(stored)
    }

    /// Add many answers and persist once.
    ///
    /// Invalid answers are counted as rejected and skipped.
    pub async fn import<I>(&mut self, answers: I) -> Result<ImportSummary, StoreError>
    where
        I: IntoIterator<Item = NewAnswer>,
    {
        let state = self.loaded_mut()?;
        let mut summary = ImportSummary::default();
        for answer in answers {
            if let Err(err) = answer.validate() {
                debug!(error = %err, "rejecting imported answer");
                summary.rejected += 1;
                continue;
            }
            match state.add(answer, None)? {
                AddOutcome::Created(_) => summary.added += 1,
                AddOutcome::Existing(_) => summary.duplicates += 1,
            }
        }
        info!(
            added = summary.added,
            duplicates = summary.duplicates,
            rejected = summary.rejected,
            "import finished"
        );
        if summary.added > 0 {
            self.persist_after_mutation().await?;
        }
        Ok(summary)
    }

    /// Remove the storage key, then drop every record and reset the id
    /// counter. A failed removal leaves the store untouched.
    pub async fn clear(&mut self) -> Result<usize, StoreError> {
        let removed = self.loaded_mut()?.index.len();
        self.storage.remove(&self.name).await?;
        let state = self.loaded_mut()?;
        state.index.clear()?;
        state.auto_increment = 0;
        info!(store = %self.name, removed, "answer store cleared");
        Ok(removed)
    }

    /// Every record in insertion order.
    pub fn get_all(&self) -> Vec<&AnswerRecord> {
        self.loaded()
            .map(|state| state.index.iter().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.loaded().map_or(0, |state| state.index.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records whose field name equals `field_name` exactly.
    pub fn exact_search(&self, field_name: &str) -> Vec<ScoredAnswer> {
        let Some(state) = self.loaded() else {
            return Vec::new();
        };
        let results: Vec<ScoredAnswer> = state
            .index
            .exact_ids(field_name)
            .iter()
            .filter_map(|id| state.index.get(*id))
            .map(|record| ScoredAnswer::new(record.clone(), MatchType::Exact))
            .collect();
        debug!(field_name, matches = results.len(), "exact match search");
        results
    }

    /// Records whose field names share tokens with `field_name`, by BM25.
    pub fn lexical_search(&self, field_name: &str) -> Vec<ScoredAnswer> {
        let Some(state) = self.loaded() else {
            return Vec::new();
        };
        let hits = match state.index.lexical_hits(field_name) {
            Ok(hits) => hits,
            Err(err) => {
                warn!(field_name, error = %err, "lexical search failed, skipping it");
                return Vec::new();
            }
        };
        let results: Vec<ScoredAnswer> = hits
            .into_iter()
            .filter_map(|hit| {
                state
                    .index
                    .get(hit.id)
                    .map(|record| ScoredAnswer::new(record.clone(), MatchType::Similar(hit.score)))
            })
            .collect();
        debug!(
            field_name,
            matches = results.len(),
            top_score = results.first().and_then(|r| r.match_type.score()),
            "lexical search"
        );
        results
    }

    fn edit_distance_search(
        &self,
        field_name: &str,
        threshold: f64,
        annotate: fn(f64) -> MatchType,
    ) -> Vec<ScoredAnswer> {
        let Some(state) = self.loaded() else {
            return Vec::new();
        };
        let candidates = state
            .index
            .iter()
            .map(|record| (record.id, record.field_name.as_str()));
        rank(field_name, candidates, threshold)
            .into_iter()
            .filter_map(|candidate| {
                state
                    .index
                    .get(candidate.id)
                    .map(|record| ScoredAnswer::new(record.clone(), annotate(candidate.score)))
            })
            .collect()
    }

    /// Records whose normalized field names are within edit-distance reach.
    pub fn fuzzy_search(&self, field_name: &str) -> Vec<ScoredAnswer> {
        let results = self.edit_distance_search(field_name, FUZZY_THRESHOLD, MatchType::Fuzzy);
        debug!(field_name, matches = results.len(), "fuzzy search");
        results
    }

    /// Answers for the field described by `path`, best first.
    ///
    /// Exact matches come first, then lexical, then fuzzy; a record appears
    /// once, at its first position. Only records from the same section with
    /// a compatible field type are kept, up to [`SEARCH_LIMIT`].
    #[instrument(skip_all, fields(field_name = %path.field_name, section = %path.section))]
    pub fn search(&self, path: &FieldPath) -> Vec<ScoredAnswer> {
        if !self.is_loaded() {
            debug!("search on an unloaded store");
            return Vec::new();
        }

        let exact = self.exact_search(&path.field_name);
        let lexical = self.lexical_search(&path.field_name);
        let fuzzy = self.fuzzy_search(&path.field_name);
        let (exact_count, lexical_count, fuzzy_count) = (exact.len(), lexical.len(), fuzzy.len());

        let mut seen = HashSet::new();
        let results: Vec<ScoredAnswer> = exact
            .into_iter()
            .chain(lexical)
            .chain(fuzzy)
            .filter(|scored| seen.insert(scored.id()))
            .filter(|scored| {
                scored.record.section == path.section
                    && self
                        .field_types
                        .compatible(&scored.record.field_type, &path.field_type)
            })
            .take(SEARCH_LIMIT)
            .collect();

        debug!(
            exact = exact_count,
            similar = lexical_count,
            fuzzy = fuzzy_count,
            returned = results.len(),
            "answer search finished"
        );
        results
    }

    /// Section- and type-agnostic suggestions ranked by edit distance only.
    #[instrument(skip(self))]
    pub fn search_probable(&self, field_name: &str, limit: usize) -> Vec<ScoredAnswer> {
        let mut results =
            self.edit_distance_search(field_name, PROBABLE_THRESHOLD, MatchType::Probable);
        results.truncate(limit);
        debug!(returned = results.len(), "probable search finished");
        results
    }

    /// Autofill confidence for the best `search` result of `path`.
    pub fn confidence(&self, path: &FieldPath) -> Confidence {
        Confidence::from_results(&self.search(path))
    }
}
