//! Batch assembly of ConceptMap groups over a whole source vocabulary.

use namaste_model::{
    ConceptMapElement, ConceptMapGroup, ConceptMapGroups, ConceptMapTarget, Result,
    TargetSystem, TerminologyEntry, TerminologyProvider,
};
use tracing::{debug, info, info_span};

use crate::resolver::MappingResolver;

/// Builds the TM2 and Biomedicine groups of a NAMASTE ConceptMap.
///
/// Each source entry is resolved once per branch. Entries without any
/// mapping in a branch are left out of that branch's group.
pub struct ConceptMapAssembler<'a, S, T> {
    resolver: &'a MappingResolver<S, T>,
}

impl<'a, S, T> ConceptMapAssembler<'a, S, T>
where
    S: TerminologyProvider,
    T: TerminologyProvider,
{
    pub fn new(resolver: &'a MappingResolver<S, T>) -> Self {
        Self { resolver }
    }

    /// Assemble both groups from `entries`, in the given entry order.
    ///
    /// # Errors
    ///
    /// The first provider failure aborts assembly; a partial map is never
    /// returned.
    pub fn assemble(&self, entries: &[TerminologyEntry]) -> Result<ConceptMapGroups> {
        let span = info_span!("assemble_concept_map", entries = entries.len());
        let _guard = span.enter();

        let groups = ConceptMapGroups {
            tm2: self.assemble_group(entries, TargetSystem::Tm2)?,
            biomedicine: self.assemble_group(entries, TargetSystem::Biomedicine)?,
        };

        for (system, group) in groups.iter() {
            info!(
                system = %system,
                elements = group.element.len(),
                targets = group.target_count(),
                "assembled concept map group"
            );
        }
        Ok(groups)
    }

    fn assemble_group(
        &self,
        entries: &[TerminologyEntry],
        system: TargetSystem,
    ) -> Result<ConceptMapGroup> {
        let mut group = ConceptMapGroup::new(system);
        for entry in entries {
            let candidates = self.resolver.translate_forward(&entry.code, system.into())?;
            if candidates.is_empty() {
                debug!(code = %entry.code, system = %system, "no mappings; omitted");
                continue;
            }
            group.element.push(ConceptMapElement {
                code: entry.code.clone(),
                display: entry.display.clone(),
                target: candidates
                    .iter()
                    .map(|candidate| ConceptMapTarget {
                        code: candidate.target.code.clone(),
                        display: candidate.target.display.clone(),
                        equivalence: candidate.equivalence,
                        comment: candidate.comment(),
                    })
                    .collect(),
            });
        }
        Ok(group)
    }
}

impl<S, T> MappingResolver<S, T>
where
    S: TerminologyProvider,
    T: TerminologyProvider,
{
    /// Shorthand for [`ConceptMapAssembler::assemble`].
    pub fn assemble(&self, entries: &[TerminologyEntry]) -> Result<ConceptMapGroups> {
        ConceptMapAssembler::new(self).assemble(entries)
    }
}
