//! Query module - read-only commands over the answer store

pub mod confidence;
pub mod get;
pub mod list;
pub mod probable;
pub mod search;
