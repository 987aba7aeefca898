pub mod concept_map;
pub mod entry;
pub mod error;
pub mod mapping;
pub mod provider;
pub mod system;

pub use concept_map::{ConceptMapElement, ConceptMapGroup, ConceptMapGroups, ConceptMapTarget};
pub use entry::TerminologyEntry;
pub use error::{MappingError, ProviderError, Result};
pub use mapping::{Equivalence, MappingCandidate, MappingMethod, MappingValidation, Recommendation};
pub use provider::TerminologyProvider;
pub use system::{
    CodeSystem, ICD11_BIOMEDICINE_URI, ICD11_RELEASE, ICD11_TM2_URI, NAMASTE_URI,
    NAMASTE_VERSION, TargetSelection, TargetSystem,
};
