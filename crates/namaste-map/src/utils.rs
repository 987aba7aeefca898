//! Utility functions for ranking mapping candidates.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use namaste_model::MappingCandidate;

/// Sorts candidates by descending confidence and drops repeated targets.
///
/// For each `(target system, target code)` only the highest-confidence
/// candidate is kept. Ties keep the candidate that was found first.
pub fn rank_candidates(mut candidates: Vec<MappingCandidate>) -> Vec<MappingCandidate> {
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    let mut seen = BTreeSet::new();
    candidates.retain(|candidate| {
        seen.insert((candidate.target.system, candidate.target.code.clone()))
    });
    candidates
}
