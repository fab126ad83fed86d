//! Edit module - commands that change the answer store

pub mod add;
pub mod clear;
pub mod cv;
pub mod delete;
pub mod import;
pub mod update;
