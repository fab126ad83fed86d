// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field-label canonicalization
//!
//! Labels captured from different sites spell the same field in different
//! ways ("02_FirstName", "First Name", "firstname2"). Matching compares the
//! canonical form: lowercase ASCII letters only.

/// Canonicalize a field label for comparison.
///
/// Lowercases, drops every decimal digit, then drops every character that is
/// not an ASCII letter `a`–`z`. Non-ASCII letters are dropped too.
pub fn normalize(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !c.is_ascii_digit())
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}
