//! Validation of translation requests arriving at the engine boundary.

use namaste_model::{CodeSystem, MappingError, Result, TargetSelection, TargetSystem};

/// Direction of a parsed translation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationDirection {
    /// NAMASTE into one or both ICD-11 branches.
    Forward(TargetSelection),
    /// One ICD-11 branch back into NAMASTE.
    Reverse(TargetSystem),
}

/// A validated code translation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    pub code: String,
    pub system: CodeSystem,
    pub direction: TranslationDirection,
}

impl TranslateRequest {
    /// Parses raw request parameters.
    ///
    /// `system` names the code system of `code`. `target` is optional: a
    /// NAMASTE source defaults to both ICD-11 branches and an ICD-11 source
    /// always translates back into NAMASTE.
    ///
    /// # Errors
    ///
    /// - [`MappingError::InvalidRequest`] for an empty code or a translation of
    ///   a system into itself
    /// - [`MappingError::UnsupportedSystem`] for an unknown identifier
    pub fn parse(code: &str, system: &str, target: Option<&str>) -> Result<Self> {
        let code = code.trim();
        if code.is_empty() {
            return Err(MappingError::InvalidRequest("code must not be empty".to_string()));
        }
        let system: CodeSystem = system.parse()?;
        let target = target.map(str::trim).filter(|target| !target.is_empty());

        let direction = match system {
            CodeSystem::Namaste => TranslationDirection::Forward(match target {
                Some(target) => target.parse()?,
                None => TargetSelection::Both,
            }),
            CodeSystem::Icd11(source) => {
                if let Some(target) = target {
                    if target.eq_ignore_ascii_case("both") {
                        return Err(MappingError::InvalidRequest(format!(
                            "{source} codes translate only into namaste"
                        )));
                    }
                    match target.parse::<CodeSystem>()? {
                        CodeSystem::Namaste => {}
                        CodeSystem::Icd11(other) if other == source => {
                            return Err(MappingError::self_translation(system));
                        }
                        CodeSystem::Icd11(other) => {
                            return Err(MappingError::InvalidRequest(format!(
                                "cannot translate {source} to {other}"
                            )));
                        }
                    }
                }
                TranslationDirection::Reverse(source)
            }
        };

        Ok(Self {
            code: code.to_string(),
            system,
            direction,
        })
    }

    /// Code system the results are expressed in, or `None` for both branches.
    pub fn result_system(&self) -> Option<CodeSystem> {
        match self.direction {
            TranslationDirection::Forward(TargetSelection::Both) => None,
            TranslationDirection::Forward(TargetSelection::Only(target)) => Some(target.into()),
            TranslationDirection::Reverse(_) => Some(CodeSystem::Namaste),
        }
    }
}
