#![deny(unsafe_code)]

use std::fmt;

use namaste_model::{CodeSystem, TargetSystem};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest: ManifestHeader,
    #[serde(default)]
    pub notes: Option<ManifestNotes>,
    pub pins: Pins,
    pub files: Vec<ManifestFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestNotes {
    pub summary: Option<String>,
}

/// Pinned releases of the bundled terminologies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pins {
    pub namaste: String,
    pub icd11: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    pub path: String,
    pub sha256: String,
    pub role: FileRole,
    #[serde(default)]
    pub notes: Option<String>,
}

/// What a manifest file contributes to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileRole {
    Namaste,
    Tm2,
    Biomedicine,
    PredefinedMappings,
}

impl FileRole {
    pub const ALL: [FileRole; 4] = [
        FileRole::Namaste,
        FileRole::Tm2,
        FileRole::Biomedicine,
        FileRole::PredefinedMappings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Namaste => "namaste",
            Self::Tm2 => "tm2",
            Self::Biomedicine => "biomedicine",
            Self::PredefinedMappings => "predefined_mappings",
        }
    }

    /// Code system of a vocabulary role; `None` for the mapping table.
    pub fn code_system(self) -> Option<CodeSystem> {
        match self {
            Self::Namaste => Some(CodeSystem::Namaste),
            Self::Tm2 => Some(TargetSystem::Tm2.into()),
            Self::Biomedicine => Some(TargetSystem::Biomedicine.into()),
            Self::PredefinedMappings => None,
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
