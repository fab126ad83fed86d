//! Error types with helpful suggestions
//!
//! Library operations return typed errors; the CLI wraps them in `anyhow`
//! and prints the suggestion text below them.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`AnswerStore`](crate::store::AnswerStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A mutating call arrived before `load` completed.
    #[error(
        "answer store '{name}' is not loaded\n\n\
         Suggestion: await `AnswerStore::load()` before adding, updating or deleting answers."
    )]
    NotLoaded { name: String },

    /// `load` was called on a store that already hydrated its state.
    #[error("answer store '{name}' is already loaded; create a new store to reload from storage")]
    AlreadyLoaded { name: String },

    /// The lexical index rejected a mutation. The record collection is unchanged.
    #[error("lexical index update failed: {0}")]
    Index(#[from] tantivy::TantivyError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    InvalidAnswer(#[from] AnswerError),
}

/// Errors from a [`Storage`](crate::store::Storage) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to {action} storage file '{}': {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage file '{}' is not a JSON object", path.display())]
    NotAnObject { path: PathBuf },

    #[error("failed to encode or decode storage JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A user-entered answer that cannot be stored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnswerError {
    #[error(
        "answer is missing its {field}\n\n\
         Suggestion: section, field type and field name are all required.\n\
         Example: answerbank add --section \"Personal Information\" --type text --field \"Email\" a@b.com"
    )]
    MissingField { field: &'static str },
}

/// Helper functions for creating helpful error messages
pub mod suggestions {
    /// Get suggestion for a search that matched nothing
    pub fn no_results_suggestion(field_name: &str, section: &str) -> String {
        format!(
            "No stored answer matches '{}' in section '{}'\n\n\
             Try:\n\
             - Checking the section name (sections must match exactly)\n\
             - 'answerbank probable \"{}\"' to look across all sections and types",
            field_name, section, field_name
        )
    }

    /// Get suggestion for an empty store
    pub fn empty_store_suggestion(store_path: &str) -> String {
        format!(
            "No answers stored in '{}'\n\n\
             Add one:\n\
             $ answerbank add --section \"Personal Information\" --type text --field \"Email\" a@b.com\n\n\
             Or import a JSON list of answers:\n\
             $ answerbank import answers.json",
            store_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_loaded_message_names_the_store_and_the_fix() {
        let message = StoreError::NotLoaded {
            name: "answers".to_string(),
        }
        .to_string();
        assert!(message.contains("'answers'"));
        assert!(message.contains("load()"));
    }

    #[test]
    fn missing_field_message_names_the_field() {
        let message = AnswerError::MissingField { field: "section" }.to_string();
        assert!(message.starts_with("answer is missing its section"));
    }
}
