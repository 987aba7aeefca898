//! Code system identifiers for the source vocabulary and the ICD-11 branches.
//!
//! Identifiers arrive from callers either as short names (`tm2`,
//! `biomedicine`, `namaste`) or as canonical URIs. Both forms parse to the
//! same enum values; anything else is an unsupported system.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MappingError;

/// Canonical URI of the NAMASTE code system.
pub const NAMASTE_URI: &str = "http://terminology.mohayush.gov.in/namaste";
/// Published NAMASTE code system version.
pub const NAMASTE_VERSION: &str = "1.0.0";
/// Canonical URI of the ICD-11 Traditional Medicine Module 2 branch.
pub const ICD11_TM2_URI: &str = "http://id.who.int/icd/release/11/2023-01/tm2";
/// Canonical URI of the ICD-11 Mortality and Morbidity Statistics branch.
pub const ICD11_BIOMEDICINE_URI: &str = "http://id.who.int/icd/release/11/2023-01/mms";
/// ICD-11 release both branches are pinned to.
pub const ICD11_RELEASE: &str = "2023-01";

/// One of the two ICD-11 branches a NAMASTE code can be mapped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSystem {
    /// Traditional Medicine Module 2 pattern codes.
    Tm2,
    /// General biomedical (MMS) codes.
    Biomedicine,
}

impl TargetSystem {
    /// Both branches, in export order.
    pub const ALL: [TargetSystem; 2] = [TargetSystem::Tm2, TargetSystem::Biomedicine];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tm2 => "tm2",
            Self::Biomedicine => "biomedicine",
        }
    }

    pub fn uri(self) -> &'static str {
        match self {
            Self::Tm2 => ICD11_TM2_URI,
            Self::Biomedicine => ICD11_BIOMEDICINE_URI,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Tm2 => "ICD-11 Traditional Medicine Module 2",
            Self::Biomedicine => "ICD-11 Biomedicine",
        }
    }
}

impl fmt::Display for TargetSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetSystem {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match CodeSystem::from_str(s)? {
            CodeSystem::Icd11(target) => Ok(target),
            CodeSystem::Namaste => Err(MappingError::UnsupportedSystem(s.trim().to_string())),
        }
    }
}

/// Any code system the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeSystem {
    /// The NAMASTE source vocabulary.
    Namaste,
    /// One of the ICD-11 branches.
    #[serde(untagged)]
    Icd11(TargetSystem),
}

impl CodeSystem {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Namaste => "namaste",
            Self::Icd11(target) => target.as_str(),
        }
    }

    pub fn uri(self) -> &'static str {
        match self {
            Self::Namaste => NAMASTE_URI,
            Self::Icd11(target) => target.uri(),
        }
    }

    pub fn version(self) -> &'static str {
        match self {
            Self::Namaste => NAMASTE_VERSION,
            Self::Icd11(_) => ICD11_RELEASE,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Namaste => "NAMASTE",
            Self::Icd11(target) => target.title(),
        }
    }

    /// Returns the ICD-11 branch, or `None` for the source vocabulary.
    pub fn target(self) -> Option<TargetSystem> {
        match self {
            Self::Namaste => None,
            Self::Icd11(target) => Some(target),
        }
    }
}

impl From<TargetSystem> for CodeSystem {
    fn from(target: TargetSystem) -> Self {
        Self::Icd11(target)
    }
}

impl fmt::Display for CodeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeSystem {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let lower = raw.to_lowercase();
        match lower.as_str() {
            "namaste" => return Ok(Self::Namaste),
            "tm2" => return Ok(Self::Icd11(TargetSystem::Tm2)),
            "biomedicine" | "mms" => return Ok(Self::Icd11(TargetSystem::Biomedicine)),
            _ => {}
        }
        if lower.contains("namaste") {
            return Ok(Self::Namaste);
        }
        if lower.contains("icd") {
            if lower.contains("tm2") {
                return Ok(Self::Icd11(TargetSystem::Tm2));
            }
            if lower.contains("mms") {
                return Ok(Self::Icd11(TargetSystem::Biomedicine));
            }
        }
        Err(MappingError::UnsupportedSystem(raw.to_string()))
    }
}

/// Which ICD-11 branches a forward translation should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSelection {
    /// Both branches.
    #[default]
    Both,
    /// A single branch.
    #[serde(untagged)]
    Only(TargetSystem),
}

impl TargetSelection {
    pub fn includes(self, system: TargetSystem) -> bool {
        match self {
            Self::Both => true,
            Self::Only(only) => only == system,
        }
    }

    /// Selected branches in export order.
    pub fn systems(self) -> Vec<TargetSystem> {
        TargetSystem::ALL
            .into_iter()
            .filter(|system| self.includes(*system))
            .collect()
    }
}

impl From<TargetSystem> for TargetSelection {
    fn from(target: TargetSystem) -> Self {
        Self::Only(target)
    }
}

impl fmt::Display for TargetSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Both => f.write_str("both"),
            Self::Only(target) => target.fmt(f),
        }
    }
}

impl FromStr for TargetSelection {
    type Err = MappingError;

    /// Parses `both` or any ICD-11 branch identifier.
    ///
    /// A NAMASTE identifier is rejected as an invalid request: forward
    /// translation always starts from NAMASTE, so it would be a translation of
    /// the system to itself.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("both") {
            return Ok(Self::Both);
        }
        match CodeSystem::from_str(s)? {
            CodeSystem::Icd11(target) => Ok(Self::Only(target)),
            CodeSystem::Namaste => Err(MappingError::self_translation(CodeSystem::Namaste)),
        }
    }
}
