//! Loaders for vocabulary and curated mapping files.

use std::path::Path;

use namaste_map::PredefinedMappingTable;
use namaste_model::{CodeSystem, TerminologyEntry};
use serde::Deserialize;

use crate::error::StandardsError;
use crate::paths::terminology_root;
use crate::provider::Vocabulary;
use crate::registry::{TerminologyRegistry, VerifySummary};

#[derive(Debug, Deserialize)]
struct VocabularyFile {
    system: CodeSystem,
    version: String,
    concepts: Vec<ConceptRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConceptRecord {
    code: String,
    display: String,
    #[serde(default)]
    definition: String,
    #[serde(default)]
    tradition: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    body_system: Option<String>,
    #[serde(default)]
    parent: Vec<String>,
}

impl ConceptRecord {
    fn into_entry(self, system: CodeSystem) -> TerminologyEntry {
        TerminologyEntry {
            code: self.code.trim().to_string(),
            display: self.display,
            definition: self.definition,
            system,
            tradition: self.tradition,
            category: self.category,
            body_system: self.body_system,
            parent: self.parent,
        }
    }
}

/// Load one vocabulary JSON file.
///
/// The file looks like:
///
/// ```json
/// { "system": "namaste", "version": "1.0.0", "concepts": [ { "code": "NAM001", "display": "..." } ] }
/// ```
pub fn load_vocabulary(path: &Path) -> Result<Vocabulary, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let file: VocabularyFile =
        serde_json::from_str(&contents).map_err(|e| StandardsError::json(path, e))?;
    let system = file.system;
    let entries = file
        .concepts
        .into_iter()
        .map(|concept| concept.into_entry(system))
        .collect();
    Vocabulary::new(system, file.version, entries)
}

/// Load the curated mapping table.
pub fn load_predefined_mappings(path: &Path) -> Result<PredefinedMappingTable, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    PredefinedMappingTable::from_json_str(&contents).map_err(|e| StandardsError::json(path, e))
}

/// Verify and load the terminology shipped in [`terminology_root`].
pub fn load_default_registry() -> Result<(TerminologyRegistry, VerifySummary), StandardsError> {
    TerminologyRegistry::verify_and_load(&terminology_root())
}
