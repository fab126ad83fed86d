// SPDX-License-Identifier: MIT OR Apache-2.0

//! Levenshtein distance, normalized similarity and candidate ranking
//!
//! Backs the fuzzy and probable strategies of the answer store. Distance is
//! computed over `char`s with a rolling single-row table sized to the shorter
//! input.

use std::cmp::Ordering;

use super::normalize::normalize;

/// Minimum similarity for a record to count as a fuzzy match in `search`.
pub const FUZZY_THRESHOLD: f64 = 0.4;

/// Minimum similarity for exploratory, section/type agnostic suggestions.
pub const PROBABLE_THRESHOLD: f64 = 0.35;

/// Edit distance with unit-cost insert, delete and substitute.
pub fn distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    // Row is indexed by the shorter string.
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();

    for (j, &lc) in long.iter().enumerate() {
        // `diagonal` holds row[i - 1] from the previous iteration.
        let mut diagonal = row[0];
        row[0] = j + 1;
        for (i, &sc) in short.iter().enumerate() {
            let above = row[i + 1];
            let cost = usize::from(sc != lc);
            row[i + 1] = (row[i] + 1).min(above + 1).min(diagonal + cost);
            diagonal = above;
        }
    }

    row[short.len()]
}

/// Similarity in `[0, 1]` between two labels after normalization.
///
/// Two labels that normalize to nothing are considered identical; a single
/// empty side scores zero.
pub fn similarity(a: &str, b: &str) -> f64 {
    let na = normalize(a);
    let nb = normalize(b);

    match (na.is_empty(), nb.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        _ => {}
    }

    // Normalized strings are ASCII, so byte length equals char count.
    let max_len = na.len().max(nb.len());
    1.0 - distance(&na, &nb) as f64 / max_len as f64
}

/// A scored candidate produced by [`rank`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCandidate {
    pub id: u64,
    pub score: f64,
}

/// Score every `(id, field_name)` candidate against `query`.
///
/// Scores strictly below `threshold` are dropped. The result is sorted by
/// descending score; equal scores keep the candidates' input order.
pub fn rank<'a, I>(query: &str, candidates: I, threshold: f64) -> Vec<RankedCandidate>
where
    I: IntoIterator<Item = (u64, &'a str)>,
{
    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .map(|(id, field_name)| RankedCandidate {
            id,
            score: similarity(query, field_name),
        })
        .filter(|candidate| candidate.score >= threshold)
        .collect();

    // `sort_by` is stable.
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_known_values() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("flaw", "lawn"), 2);
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("abc", ""), 3);
        assert_eq!(distance("email", "emal"), 1);
        // A transposition is two edits.
        assert_eq!(distance("emial", "email"), 2);
    }

    #[test]
    fn distance_is_zero_only_for_identical_strings() {
        assert_eq!(distance("same", "same"), 0);
        assert_eq!(distance("", ""), 0);
        assert_ne!(distance("same", "Same"), 0);
    }

    #[test]
    fn distance_is_symmetric_and_obeys_triangle_inequality() {
        let words = ["phone", "phone number", "mobile", "", "fone", "zip code"];
        for a in words {
            for b in words {
                assert_eq!(distance(a, b), distance(b, a), "{a:?} vs {b:?}");
                for c in words {
                    assert!(distance(a, c) <= distance(a, b) + distance(b, c));
                }
            }
        }
    }

    #[test]
    fn distance_counts_chars_not_bytes() {
        assert_eq!(distance("café", "cafe"), 1);
    }

    #[test]
    fn similarity_edge_cases() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("123", "__"), 1.0);
        assert_eq!(similarity("x", ""), 0.0);
        assert_eq!(similarity("", "x"), 0.0);
        assert_eq!(similarity("First Name", "firstname"), 1.0);
        assert!((similarity("Email", "Emal") - 0.8).abs() < 1e-9);
    }

    #[test]
    fn similarity_stays_in_unit_interval() {
        let labels = ["Email", "e-mail address", "Phone", "", "12", "Résumé upload"];
        for a in labels {
            for b in labels {
                let s = similarity(a, b);
                assert!((0.0..=1.0).contains(&s), "{a:?} vs {b:?} gave {s}");
            }
        }
    }

    #[test]
    fn rank_filters_and_orders_with_stable_ties() {
        let candidates = vec![
            (1, "Last Name"),
            (2, "First Name"),
            (3, "Email"),
            (4, "first_name"),
        ];
        let ranked = rank("firstname", candidates.iter().map(|(id, n)| (*id, *n)), 0.4);
        let ids: Vec<u64> = ranked.iter().map(|c| c.id).collect();
        // 2 and 4 both score 1.0 and keep input order; "Email" falls below.
        assert_eq!(ids, vec![2, 4, 1]);
        assert!(ranked.iter().all(|c| c.score >= 0.4));
    }

    #[test]
    fn rank_keeps_scores_equal_to_threshold() {
        // "abcde" vs "abxyz": distance 3 over 5 letters.
        let ranked = rank("abcde", [(7, "abxyz")], 0.4);
        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].score - 0.4).abs() < 1e-9);
    }
}
