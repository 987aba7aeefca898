use serde::{Deserialize, Serialize};

use crate::equivalence::{EquivalenceThresholds, RecommendationThresholds};

/// Tunables for the mapping resolver.
///
/// Every field has a default, so a configuration file only needs to name the
/// values it changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingOptions {
    /// Heuristic candidates must score strictly above this (default: 0.3).
    pub min_confidence: f64,
    /// Maximum forward translation results (default: 5).
    pub forward_limit: usize,
    /// Candidates requested per search term and branch (default: 3).
    pub per_term_limit: usize,
    /// Results requested per reverse free-text query (default: 5).
    pub reverse_query_limit: usize,
    /// Confidence reported for curated mappings (default: 0.9).
    pub predefined_confidence: f64,
    pub thresholds: EquivalenceThresholds,
    pub recommendation: RecommendationThresholds,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            forward_limit: 5,
            per_term_limit: 3,
            reverse_query_limit: 5,
            predefined_confidence: 0.9,
            thresholds: EquivalenceThresholds::default(),
            recommendation: RecommendationThresholds::default(),
        }
    }
}
