//! Confidence to equivalence and recommendation classification.

use namaste_model::{Equivalence, Recommendation};
use serde::{Deserialize, Serialize};

/// Inclusive lower bounds that turn a confidence score into an [`Equivalence`].
///
/// - At or above `equivalent`: [`Equivalence::Equivalent`]
/// - `wider` to `equivalent`: [`Equivalence::Wider`]
/// - `narrower` to `wider`: [`Equivalence::Narrower`]
/// - Below `narrower`: [`Equivalence::Related`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EquivalenceThresholds {
    /// Minimum confidence for an equivalent match (default: 0.8).
    pub equivalent: f64,
    /// Minimum confidence for a wider match (default: 0.6).
    pub wider: f64,
    /// Minimum confidence for a narrower match (default: 0.4).
    pub narrower: f64,
}

impl Default for EquivalenceThresholds {
    fn default() -> Self {
        Self {
            equivalent: 0.8,
            wider: 0.6,
            narrower: 0.4,
        }
    }
}

impl EquivalenceThresholds {
    /// Classifies a confidence score. Total over all floats; NaN is related.
    #[must_use]
    pub fn classify(&self, confidence: f64) -> Equivalence {
        if confidence >= self.equivalent {
            Equivalence::Equivalent
        } else if confidence >= self.wider {
            Equivalence::Wider
        } else if confidence >= self.narrower {
            Equivalence::Narrower
        } else {
            Equivalence::Related
        }
    }
}

/// Classifies with the default thresholds.
#[must_use]
pub fn classify(confidence: f64) -> Equivalence {
    EquivalenceThresholds::default().classify(confidence)
}

/// Strict lower bounds for reviewer recommendations on validated mappings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecommendationThresholds {
    /// Confidence above which a mapping is accepted (default: 0.6).
    pub accept: f64,
    /// Confidence above which a mapping is sent to review (default: 0.3).
    pub review: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            accept: 0.6,
            review: 0.3,
        }
    }
}

impl RecommendationThresholds {
    #[must_use]
    pub fn recommend(&self, confidence: f64) -> Recommendation {
        if confidence > self.accept {
            Recommendation::Accept
        } else if confidence > self.review {
            Recommendation::Review
        } else {
            Recommendation::Reject
        }
    }
}
