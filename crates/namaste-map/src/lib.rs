#![deny(unsafe_code)]

//! NAMASTE to ICD-11 mapping engine.
//!
//! [`MappingResolver`] answers forward and reverse translations and validates
//! proposed mappings; [`ConceptMapAssembler`] batches forward translations
//! into ConceptMap groups.

pub mod assemble;
pub mod equivalence;
pub mod options;
pub mod predefined;
pub mod request;
pub mod resolver;
pub mod score;
pub mod terms;
pub mod utils;

pub use assemble::ConceptMapAssembler;
pub use equivalence::{EquivalenceThresholds, RecommendationThresholds, classify};
pub use options::MappingOptions;
pub use predefined::{PredefinedMappingTable, PredefinedTarget};
pub use request::{TranslateRequest, TranslationDirection};
pub use resolver::MappingResolver;
pub use score::{ScoreComponent, SimilarityScore, SimilarityScorer, text_ratio};
pub use terms::{SearchTermTaxonomy, TermField, TermRule, extract_search_terms};
pub use utils::rank_candidates;
