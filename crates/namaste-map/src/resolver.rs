//! Mapping resolver: forward and reverse translation between NAMASTE and
//! ICD-11.

use namaste_model::{
    CodeSystem, MappingCandidate, MappingError, MappingMethod, MappingValidation, Result,
    TargetSelection, TargetSystem, TerminologyEntry, TerminologyProvider,
};
use tracing::{debug, debug_span, warn};

use crate::options::MappingOptions;
use crate::predefined::PredefinedMappingTable;
use crate::request::{TranslateRequest, TranslationDirection};
use crate::score::SimilarityScorer;
use crate::terms::SearchTermTaxonomy;
use crate::utils::rank_candidates;

/// Resolves NAMASTE codes to ICD-11 codes and back.
///
/// Curated mappings from the [`PredefinedMappingTable`] are consulted first.
/// Only when a code has no curated entry does the resolver search the target
/// terminology heuristically, scoring each candidate with the
/// [`SimilarityScorer`].
///
/// Provider failures are returned as errors. An empty result always means the
/// lookup succeeded and nothing cleared the confidence threshold.
///
/// # Example
///
/// ```ignore
/// use namaste_map::MappingResolver;
/// use namaste_model::TargetSelection;
///
/// let resolver = MappingResolver::new(source, icd11, predefined);
/// let matches = resolver.translate_forward("NAM005", TargetSelection::Both)?;
/// ```
#[derive(Debug, Clone)]
pub struct MappingResolver<S, T> {
    source: S,
    target: T,
    predefined: PredefinedMappingTable,
    scorer: SimilarityScorer,
    taxonomy: SearchTermTaxonomy,
    options: MappingOptions,
}

impl<S, T> MappingResolver<S, T>
where
    S: TerminologyProvider,
    T: TerminologyProvider,
{
    /// Creates a resolver with default scoring, taxonomy and options.
    ///
    /// # Arguments
    ///
    /// * `source` - Provider serving the NAMASTE vocabulary
    /// * `target` - Provider serving the ICD-11 branches
    /// * `predefined` - Curated mappings consulted before any search
    pub fn new(source: S, target: T, predefined: PredefinedMappingTable) -> Self {
        Self {
            source,
            target,
            predefined,
            scorer: SimilarityScorer::default(),
            taxonomy: SearchTermTaxonomy::default(),
            options: MappingOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: MappingOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: SimilarityScorer) -> Self {
        self.scorer = scorer;
        self
    }

    #[must_use]
    pub fn with_taxonomy(mut self, taxonomy: SearchTermTaxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    /// Runs a parsed translation request in its direction.
    pub fn translate(&self, request: &TranslateRequest) -> Result<Vec<MappingCandidate>> {
        match request.direction {
            TranslationDirection::Forward(selection) => {
                self.translate_forward(&request.code, selection)
            }
            TranslationDirection::Reverse(system) => self.translate_reverse(&request.code, system),
        }
    }

    /// Translates a NAMASTE code into the selected ICD-11 branches.
    ///
    /// A curated code returns only its curated targets, even when they cover
    /// just one of the selected branches. Heuristic results are ranked,
    /// deduplicated by target and cut to `forward_limit`.
    pub fn translate_forward(
        &self,
        code: &str,
        selection: TargetSelection,
    ) -> Result<Vec<MappingCandidate>> {
        let span = debug_span!("translate_forward", code, target = %selection);
        let _guard = span.enter();

        if let Some(curated) = self.predefined.get(code) {
            let source = self
                .source
                .get_by_code(code, CodeSystem::Namaste)?
                .unwrap_or_else(|| placeholder(CodeSystem::Namaste, code));
            let mut candidates = Vec::new();
            for mapping in curated.iter().filter(|m| selection.includes(m.system)) {
                match self.target.get_by_code(&mapping.code, mapping.system.into())? {
                    Some(target) => candidates.push(MappingCandidate {
                        source: source.clone(),
                        target,
                        confidence: self.options.predefined_confidence,
                        equivalence: mapping.equivalence,
                        method: MappingMethod::Predefined,
                    }),
                    None => warn!(
                        source = code,
                        target = %mapping.code,
                        system = %mapping.system,
                        "curated target code missing from terminology"
                    ),
                }
            }
            debug!(count = candidates.len(), "resolved curated mappings");
            return Ok(candidates);
        }

        let Some(source) = self.source.get_by_code(code, CodeSystem::Namaste)? else {
            debug!("source code not in vocabulary");
            return Ok(Vec::new());
        };

        let terms = self.taxonomy.extract(&source);
        let mut candidates = Vec::new();
        for term in &terms {
            for system in selection.systems() {
                let found =
                    self.target
                        .search(term, system.into(), self.options.per_term_limit)?;
                debug!(term = %term, system = %system, found = found.len(), "searched target");
                for entry in found {
                    let confidence = self.scorer.score(&source, &entry);
                    if confidence <= self.options.min_confidence {
                        continue;
                    }
                    candidates.push(self.scored_candidate(
                        source.clone(),
                        entry,
                        confidence,
                        MappingMethod::Automatic,
                    ));
                }
            }
        }

        let mut ranked = rank_candidates(candidates);
        ranked.truncate(self.options.forward_limit);
        debug!(terms = terms.len(), count = ranked.len(), "resolved automatic mappings");
        Ok(ranked)
    }

    /// Translates an ICD-11 code back into NAMASTE.
    ///
    /// Every curated source that lists the code is returned. Without curated
    /// matches the code's own display and definition are used as free-text
    /// queries against NAMASTE. Results are sorted by confidence but not cut.
    pub fn translate_reverse(
        &self,
        code: &str,
        system: TargetSystem,
    ) -> Result<Vec<MappingCandidate>> {
        let span = debug_span!("translate_reverse", code, system = %system);
        let _guard = span.enter();

        let target_entry = self.target.get_by_code(code, system.into())?;
        let mut candidates = Vec::new();

        for (source_code, mapping) in self.predefined.sources_for(system, code) {
            match self.source.get_by_code(source_code, CodeSystem::Namaste)? {
                Some(namaste) => candidates.push(MappingCandidate {
                    source: target_entry
                        .clone()
                        .unwrap_or_else(|| placeholder(system.into(), code)),
                    target: namaste,
                    confidence: self.options.predefined_confidence,
                    equivalence: mapping.equivalence,
                    method: MappingMethod::Predefined,
                }),
                None => warn!(
                    source = source_code,
                    target = code,
                    "curated source code missing from vocabulary"
                ),
            }
        }

        if candidates.is_empty() {
            let Some(icd) = target_entry else {
                debug!("target code not in terminology");
                return Ok(Vec::new());
            };
            for query in [&icd.display, &icd.definition] {
                if query.trim().is_empty() {
                    continue;
                }
                let found = self.source.search(
                    query,
                    CodeSystem::Namaste,
                    self.options.reverse_query_limit,
                )?;
                debug!(query = %query, found = found.len(), "searched source vocabulary");
                for entry in found {
                    let confidence = self.scorer.score(&entry, &icd);
                    if confidence <= self.options.min_confidence {
                        continue;
                    }
                    candidates.push(self.scored_candidate(
                        icd.clone(),
                        entry,
                        confidence,
                        MappingMethod::AutomaticReverse,
                    ));
                }
            }
        }

        let ranked = rank_candidates(candidates);
        debug!(count = ranked.len(), "resolved reverse mappings");
        Ok(ranked)
    }

    /// Checks a proposed mapping and recommends whether to accept it.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::NotFound`] when either code is unknown to its
    /// own code system.
    pub fn validate_mapping(
        &self,
        source_code: &str,
        target_code: &str,
        system: TargetSystem,
    ) -> Result<MappingValidation> {
        let source = self
            .source
            .get_by_code(source_code, CodeSystem::Namaste)?
            .ok_or_else(|| MappingError::not_found(CodeSystem::Namaste, source_code))?;
        let target = self
            .target
            .get_by_code(target_code, system.into())?
            .ok_or_else(|| MappingError::not_found(system.into(), target_code))?;

        let (confidence, equivalence, method) =
            match self.predefined.find(source_code, system, target_code) {
                Some(curated) => (
                    self.options.predefined_confidence,
                    curated.equivalence,
                    MappingMethod::Predefined,
                ),
                None => {
                    let confidence = self.scorer.score(&source, &target);
                    (
                        confidence,
                        self.options.thresholds.classify(confidence),
                        MappingMethod::Automatic,
                    )
                }
            };

        Ok(MappingValidation {
            valid: confidence > self.options.min_confidence,
            confidence,
            equivalence,
            recommendation: self.options.recommendation.recommend(confidence),
            method,
            source,
            target,
        })
    }

    fn scored_candidate(
        &self,
        source: TerminologyEntry,
        target: TerminologyEntry,
        confidence: f64,
        method: MappingMethod,
    ) -> MappingCandidate {
        MappingCandidate {
            source,
            target,
            confidence,
            equivalence: self.options.thresholds.classify(confidence),
            method,
        }
    }
}

/// Stand-in for a curated code that its provider does not return.
fn placeholder(system: CodeSystem, code: &str) -> TerminologyEntry {
    TerminologyEntry::new(system, code, code, "")
}
