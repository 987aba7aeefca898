//! In-memory terminology providers over loaded vocabulary files.

use std::collections::BTreeMap;

use namaste_model::{CodeSystem, ProviderError, TargetSystem, TerminologyEntry, TerminologyProvider};

use crate::error::StandardsError;
use crate::hierarchy::{Hierarchy, ParentLink, code_under};

/// The concepts of one code system, in file order, indexed by code.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    system: CodeSystem,
    version: String,
    entries: Vec<TerminologyEntry>,
    by_code: BTreeMap<String, usize>,
}

impl Vocabulary {
    /// Builds a vocabulary, stamping every entry with `system`.
    ///
    /// # Errors
    ///
    /// Returns [`StandardsError::DuplicateCode`] if a code appears twice.
    pub fn new(
        system: CodeSystem,
        version: impl Into<String>,
        entries: Vec<TerminologyEntry>,
    ) -> Result<Self, StandardsError> {
        let mut by_code = BTreeMap::new();
        let mut stamped = Vec::with_capacity(entries.len());
        for (idx, mut entry) in entries.into_iter().enumerate() {
            entry.system = system;
            if by_code.insert(entry.code.clone(), idx).is_some() {
                return Err(StandardsError::DuplicateCode {
                    system,
                    code: entry.code,
                });
            }
            stamped.push(entry);
        }
        Ok(Self {
            system,
            version: version.into(),
            entries: stamped,
            by_code,
        })
    }

    pub fn system(&self) -> CodeSystem {
        self.system
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn entries(&self) -> &[TerminologyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&TerminologyEntry> {
        self.by_code.get(code).map(|idx| &self.entries[*idx])
    }

    /// Case-insensitive substring match on code, display or definition.
    ///
    /// Results keep file order. An empty query matches every entry.
    pub fn search(&self, query: &str, limit: usize) -> Vec<TerminologyEntry> {
        let needle = query.trim().to_lowercase();
        self.entries
            .iter()
            .filter(|entry| {
                needle.is_empty()
                    || entry.code.to_lowercase().contains(&needle)
                    || entry.display.to_lowercase().contains(&needle)
                    || entry.definition.to_lowercase().contains(&needle)
            })
            .take(limit)
            .cloned()
            .collect()
    }

    /// `code` with its parents and the entries that list it as a parent.
    ///
    /// Parent URIs outside this vocabulary are kept with no `entry`; a URI
    /// naming the code system itself has no `code` either.
    pub fn hierarchy(&self, code: &str) -> Option<Hierarchy> {
        let entry = self.get(code)?.clone();
        let root = self.system.uri();
        let parents = entry
            .parent
            .iter()
            .map(|uri| {
                let code = code_under(root, uri);
                let entry = code.as_deref().and_then(|code| self.get(code)).cloned();
                ParentLink {
                    uri: uri.clone(),
                    code,
                    entry,
                }
            })
            .collect();
        let uri = entry.uri();
        let children = self
            .entries
            .iter()
            .filter(|candidate| candidate.parent.iter().any(|parent| *parent == uri))
            .cloned()
            .collect();
        Some(Hierarchy {
            code: entry,
            parents,
            children,
        })
    }
}

/// Provider for the NAMASTE source vocabulary.
#[derive(Debug, Clone)]
pub struct SourceVocabulary {
    vocabulary: Vocabulary,
}

impl SourceVocabulary {
    /// # Errors
    ///
    /// Returns [`StandardsError::SystemMismatch`] unless `vocabulary` is NAMASTE.
    pub fn new(vocabulary: Vocabulary) -> Result<Self, StandardsError> {
        expect_system(&vocabulary, CodeSystem::Namaste)?;
        Ok(Self { vocabulary })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn entries(&self) -> &[TerminologyEntry] {
        self.vocabulary.entries()
    }
}

impl TerminologyProvider for SourceVocabulary {
    fn search(
        &self,
        query: &str,
        system: CodeSystem,
        limit: usize,
    ) -> Result<Vec<TerminologyEntry>, ProviderError> {
        if system != CodeSystem::Namaste {
            return Err(ProviderError::UnsupportedSystem(system));
        }
        Ok(self.vocabulary.search(query, limit))
    }

    fn get_by_code(
        &self,
        code: &str,
        system: CodeSystem,
    ) -> Result<Option<TerminologyEntry>, ProviderError> {
        if system != CodeSystem::Namaste {
            return Err(ProviderError::UnsupportedSystem(system));
        }
        Ok(self.vocabulary.get(code).cloned())
    }
}

/// Provider for the ICD-11 TM2 and Biomedicine branches.
#[derive(Debug, Clone)]
pub struct Icd11Terminology {
    tm2: Vocabulary,
    biomedicine: Vocabulary,
}

impl Icd11Terminology {
    /// # Errors
    ///
    /// Returns [`StandardsError::SystemMismatch`] if either vocabulary belongs
    /// to a different branch.
    pub fn new(tm2: Vocabulary, biomedicine: Vocabulary) -> Result<Self, StandardsError> {
        expect_system(&tm2, TargetSystem::Tm2.into())?;
        expect_system(&biomedicine, TargetSystem::Biomedicine.into())?;
        Ok(Self { tm2, biomedicine })
    }

    pub fn branch(&self, system: TargetSystem) -> &Vocabulary {
        match system {
            TargetSystem::Tm2 => &self.tm2,
            TargetSystem::Biomedicine => &self.biomedicine,
        }
    }

    fn branch_for(&self, system: CodeSystem) -> Result<&Vocabulary, ProviderError> {
        system
            .target()
            .map(|target| self.branch(target))
            .ok_or(ProviderError::UnsupportedSystem(system))
    }
}

impl TerminologyProvider for Icd11Terminology {
    fn search(
        &self,
        query: &str,
        system: CodeSystem,
        limit: usize,
    ) -> Result<Vec<TerminologyEntry>, ProviderError> {
        Ok(self.branch_for(system)?.search(query, limit))
    }

    fn get_by_code(
        &self,
        code: &str,
        system: CodeSystem,
    ) -> Result<Option<TerminologyEntry>, ProviderError> {
        Ok(self.branch_for(system)?.get(code).cloned())
    }
}

fn expect_system(vocabulary: &Vocabulary, expected: CodeSystem) -> Result<(), StandardsError> {
    if vocabulary.system() != expected {
        return Err(StandardsError::SystemMismatch {
            expected,
            found: vocabulary.system(),
        });
    }
    Ok(())
}
