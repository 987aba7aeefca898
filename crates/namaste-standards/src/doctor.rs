#![deny(unsafe_code)]

use crate::manifest::{ManifestFile, Pins};
use crate::registry::VerifySummary;

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub pins: Pins,
    pub predefined_version: String,
    pub files: Vec<ManifestFile>,
    pub counts: DoctorCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DoctorCounts {
    pub files: usize,
    pub namaste_concepts: usize,
    pub tm2_concepts: usize,
    pub biomedicine_concepts: usize,
    pub predefined_mappings: usize,
}

impl DoctorReport {
    pub fn from_verify_summary(summary: &VerifySummary, files: Vec<ManifestFile>) -> Self {
        Self {
            schema: "namaste.terminology-doctor".to_string(),
            schema_version: 1,
            pins: summary.manifest_pins.clone(),
            predefined_version: summary.predefined_version.clone(),
            files,
            counts: DoctorCounts {
                files: summary.file_count,
                namaste_concepts: summary.namaste_concepts,
                tm2_concepts: summary.tm2_concepts,
                biomedicine_concepts: summary.biomedicine_concepts,
                predefined_mappings: summary.predefined_mappings,
            },
        }
    }
}
