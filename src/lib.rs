//! answerbank - Local answer store for form autofill
//!
//! Stores answers keyed by form-field descriptions and finds them again for
//! new fields through exact, BM25 and edit-distance matching.

pub mod confidence;
pub mod config;
pub mod cv;
pub mod errors;
pub mod index;
pub mod matching;
pub mod output;
pub mod store;

pub use confidence::Confidence;
pub use errors::{AnswerError, StorageError, StoreError};
pub use store::{
    AddOutcome, AnswerRecord, AnswerStore, AnswerValue, FieldPath, FileStorage, MatchType,
    MemoryStorage, NewAnswer, PersistPolicy, ScoredAnswer, Storage,
};
