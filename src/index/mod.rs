// SPDX-License-Identifier: MIT OR Apache-2.0

//! Index module - exact-name buckets and BM25 label search

pub mod exact;
pub mod lexical;

pub use exact::ExactIndex;
pub use lexical::{LexicalHit, LexicalIndex};
