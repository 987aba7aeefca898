//! Mapping decisions produced by the resolver.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entry::TerminologyEntry;

/// How closely a mapped concept matches the concept it was mapped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Equivalence {
    Equivalent,
    Wider,
    Narrower,
    Related,
}

impl Equivalence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equivalent => "equivalent",
            Self::Wider => "wider",
            Self::Narrower => "narrower",
            Self::Related => "related",
        }
    }
}

impl fmt::Display for Equivalence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of a mapping candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingMethod {
    /// Curated entry from the predefined mapping table.
    Predefined,
    /// Heuristic NAMASTE to ICD-11 search.
    Automatic,
    /// Heuristic ICD-11 to NAMASTE search.
    AutomaticReverse,
}

impl MappingMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Predefined => "predefined",
            Self::Automatic => "automatic",
            Self::AutomaticReverse => "automatic_reverse",
        }
    }
}

impl fmt::Display for MappingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single translation result.
///
/// `source` is the concept that was translated and `target` the concept it
/// translates to, in the direction of the request: for a reverse translation
/// the source is the ICD-11 entry and the target a NAMASTE entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingCandidate {
    pub source: TerminologyEntry,
    pub target: TerminologyEntry,
    /// Confidence score (0.0 to 1.0).
    pub confidence: f64,
    pub equivalence: Equivalence,
    pub method: MappingMethod,
}

impl MappingCandidate {
    /// Provenance note used in ConceptMap exports.
    pub fn comment(&self) -> String {
        format!(
            "Mapped via {} method with confidence {:.2}",
            self.method, self.confidence
        )
    }
}

/// Reviewer guidance attached to a validated mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    Accept,
    Review,
    Reject,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Accept => "Accept",
            Self::Review => "Review",
            Self::Reject => "Reject",
        })
    }
}

/// Outcome of checking a proposed NAMASTE to ICD-11 mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingValidation {
    pub valid: bool,
    pub confidence: f64,
    pub equivalence: Equivalence,
    pub recommendation: Recommendation,
    pub method: MappingMethod,
    pub source: TerminologyEntry,
    pub target: TerminologyEntry,
}
