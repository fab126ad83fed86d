// SPDX-License-Identifier: MIT OR Apache-2.0

//! Relaxed field-type compatibility
//!
//! Adapters report input kinds inconsistently (`text`, `TextInput`, ...).
//! Two types are compatible when they are equal after trimming and
//! lowercasing, or when both belong to the same equivalence group.

/// Groups that ship with the engine. Entries are already normalized.
const BUILTIN_GROUPS: &[&[&str]] = &[&["text", "textinput"], &["textarea"]];

fn norm(field_type: &str) -> String {
    field_type.trim().to_lowercase()
}

/// Compatibility check against the built-in groups only.
pub fn compatible(a: &str, b: &str) -> bool {
    FieldTypeRules::default().compatible(a, b)
}

/// Equivalence groups used to compare declared field types.
///
/// Extra groups extend the built-in ones; they never remove a built-in pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTypeRules {
    groups: Vec<Vec<String>>,
}

impl Default for FieldTypeRules {
    fn default() -> Self {
        Self {
            groups: BUILTIN_GROUPS
                .iter()
                .map(|group| group.iter().map(|t| (*t).to_string()).collect())
                .collect(),
        }
    }
}

impl FieldTypeRules {
    /// Built-in groups plus `extra` groups (e.g. from configuration).
    pub fn with_extra_groups<I, G, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Self::default();
        for group in extra {
            let group: Vec<String> = group
                .into_iter()
                .map(|t| norm(t.as_ref()))
                .filter(|t| !t.is_empty())
                .collect();
            if !group.is_empty() {
                rules.groups.push(group);
            }
        }
        rules
    }

    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    /// Whether a record of type `a` may answer a field of type `b`.
    ///
    /// Symmetric in its arguments.
    pub fn compatible(&self, a: &str, b: &str) -> bool {
        let na = norm(a);
        let nb = norm(b);
        if na == nb {
            return true;
        }
        self.groups
            .iter()
            .any(|group| group.contains(&na) && group.contains(&nb))
    }
}
