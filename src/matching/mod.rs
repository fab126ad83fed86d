// SPDX-License-Identifier: MIT OR Apache-2.0

//! Matching primitives - label normalization, edit distance, type rules

pub mod field_type;
pub mod levenshtein;
pub mod normalize;

pub use field_type::{compatible, FieldTypeRules};
pub use levenshtein::{distance, rank, similarity, RankedCandidate};
pub use normalize::normalize;
