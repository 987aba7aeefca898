use serde::{Deserialize, Serialize};

use crate::mapping::Equivalence;
use crate::system::{NAMASTE_URI, NAMASTE_VERSION, TargetSystem};

/// One mapped target inside a ConceptMap element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptMapTarget {
    pub code: String,
    pub display: String,
    pub equivalence: Equivalence,
    pub comment: String,
}

/// All mappings of one source code into one target branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptMapElement {
    pub code: String,
    pub display: String,
    pub target: Vec<ConceptMapTarget>,
}

/// Mappings from the source vocabulary into a single ICD-11 branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMapGroup {
    pub source: String,
    pub source_version: String,
    pub target: String,
    pub target_version: String,
    pub element: Vec<ConceptMapElement>,
}

impl ConceptMapGroup {
    /// An empty group from NAMASTE into `system`.
    pub fn new(system: TargetSystem) -> Self {
        Self {
            source: NAMASTE_URI.to_string(),
            source_version: NAMASTE_VERSION.to_string(),
            target: system.uri().to_string(),
            target_version: crate::system::ICD11_RELEASE.to_string(),
            element: Vec::new(),
        }
    }

    /// Number of target records across all elements.
    pub fn target_count(&self) -> usize {
        self.element.iter().map(|element| element.target.len()).sum()
    }
}

/// The two groups of a NAMASTE to ICD-11 ConceptMap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptMapGroups {
    pub tm2: ConceptMapGroup,
    pub biomedicine: ConceptMapGroup,
}

impl ConceptMapGroups {
    pub fn get(&self, system: TargetSystem) -> &ConceptMapGroup {
        match system {
            TargetSystem::Tm2 => &self.tm2,
            TargetSystem::Biomedicine => &self.biomedicine,
        }
    }

    /// Groups in export order.
    pub fn iter(&self) -> impl Iterator<Item = (TargetSystem, &ConceptMapGroup)> {
        TargetSystem::ALL
            .into_iter()
            .map(move |system| (system, self.get(system)))
    }
}
