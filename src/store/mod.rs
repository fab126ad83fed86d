// SPDX-License-Identifier: MIT OR Apache-2.0

//! Answer storage, identity and search

pub mod answer_index;
pub mod answer_store;
pub mod legacy;
pub mod record;
pub mod snapshot;
pub mod storage;

pub use answer_store::{
    AddOutcome, AnswerStore, ImportSummary, PersistPolicy, DEFAULT_PROBABLE_LIMIT,
    DEFAULT_STORE_NAME, SEARCH_LIMIT,
};
pub use legacy::{parse_import, ImportEntry, LegacyAnswer, LegacyPath};
pub use record::{AnswerRecord, AnswerValue, FieldPath, MatchType, NewAnswer, ScoredAnswer};
pub use storage::{FileStorage, MemoryStorage, Storage};
