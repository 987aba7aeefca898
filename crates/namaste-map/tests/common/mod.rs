#![allow(dead_code)]

use namaste_map::{PredefinedMappingTable, PredefinedTarget};
use namaste_model::{
    CodeSystem, Equivalence, ProviderError, TargetSystem, TerminologyEntry, TerminologyProvider,
};

/// In-memory provider over a fixed entry list.
#[derive(Debug, Clone, Default)]
pub struct FakeProvider {
    entries: Vec<TerminologyEntry>,
}

impl FakeProvider {
    pub fn new(entries: Vec<TerminologyEntry>) -> Self {
        Self { entries }
    }
}

impl TerminologyProvider for FakeProvider {
    fn search(
        &self,
        query: &str,
        system: CodeSystem,
        limit: usize,
    ) -> Result<Vec<TerminologyEntry>, ProviderError> {
        let query = query.to_lowercase();
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.system == system)
            .filter(|entry| {
                entry.code.to_lowercase().contains(&query)
                    || entry.display.to_lowercase().contains(&query)
                    || entry.definition.to_lowercase().contains(&query)
            })
            .take(limit)
            .cloned()
            .collect())
    }

    fn get_by_code(
        &self,
        code: &str,
        system: CodeSystem,
    ) -> Result<Option<TerminologyEntry>, ProviderError> {
        Ok(self
            .entries
            .iter()
            .find(|entry| entry.system == system && entry.code == code)
            .cloned())
    }
}

/// Provider whose every call fails.
#[derive(Debug, Clone, Copy)]
pub struct FailingProvider;

impl TerminologyProvider for FailingProvider {
    fn search(
        &self,
        _query: &str,
        _system: CodeSystem,
        _limit: usize,
    ) -> Result<Vec<TerminologyEntry>, ProviderError> {
        Err(ProviderError::Unavailable("connection refused".to_string()))
    }

    fn get_by_code(
        &self,
        _code: &str,
        _system: CodeSystem,
    ) -> Result<Option<TerminologyEntry>, ProviderError> {
        Err(ProviderError::Unavailable("connection refused".to_string()))
    }
}

pub fn namaste(code: &str, display: &str, definition: &str) -> TerminologyEntry {
    TerminologyEntry::new(CodeSystem::Namaste, code, display, definition)
}

pub fn tm2(code: &str, display: &str, definition: &str) -> TerminologyEntry {
    TerminologyEntry::new(TargetSystem::Tm2.into(), code, display, definition)
}

pub fn bio(code: &str, display: &str, definition: &str) -> TerminologyEntry {
    TerminologyEntry::new(TargetSystem::Biomedicine.into(), code, display, definition)
}

pub fn source_vocabulary() -> FakeProvider {
    FakeProvider::new(vec![
        namaste(
            "NAM002",
            "Vata Dosha Imbalance",
            "Constitutional imbalance of Vata dosha affecting movement and nervous system",
        )
        .with_tradition("Ayurveda")
        .with_category("Constitutional Disorders")
        .with_body_system("Nervous System"),
        namaste(
            "NAM005",
            "Ajirna (Indigestion)",
            "Impaired digestion leading to various gastrointestinal symptoms",
        )
        .with_tradition("Ayurveda")
        .with_category("Digestive Disorders")
        .with_body_system("Gastrointestinal"),
        namaste(
            "SID001",
            "Vatham Imbalance",
            "Vatham dosha imbalance in Siddha system",
        )
        .with_tradition("Siddha")
        .with_category("Constitutional Disorders")
        .with_body_system("Nervous System"),
        namaste("NAM900", "Indigestion", "Impaired digestion"),
        namaste("NAM999", "Qqqq", "Qqqq"),
    ])
}

pub fn icd11() -> FakeProvider {
    FakeProvider::new(vec![
        tm2(
            "TM2.01",
            "Traditional Medicine Pattern - Constitutional Type",
            "Traditional medicine constitutional pattern disorders",
        ),
        tm2(
            "TM2.02",
            "Traditional Medicine Pattern - Digestive Disorders",
            "Traditional medicine digestive pattern disorders",
        ),
        bio(
            "K30",
            "Functional dyspepsia",
            "Chronic or recurrent pain or discomfort centred in the upper abdomen",
        ),
        bio("K31.9", "Indigestion", "Impaired digestion"),
        bio(
            "Z73.3",
            "Stress, not elsewhere classified",
            "Physical and mental strain",
        ),
        bio("XX1", "Zzzz", "Wwww"),
    ])
}

pub fn predefined() -> PredefinedMappingTable {
    PredefinedMappingTable::new("test")
        .with_mapping(
            "NAM002",
            [
                PredefinedTarget::new(TargetSystem::Tm2, "TM2.01", Equivalence::Equivalent),
                PredefinedTarget::new(TargetSystem::Biomedicine, "Z73.3", Equivalence::Wider),
            ],
        )
        .with_mapping(
            "NAM005",
            [
                PredefinedTarget::new(TargetSystem::Tm2, "TM2.02", Equivalence::Equivalent),
                PredefinedTarget::new(TargetSystem::Biomedicine, "K30", Equivalence::Equivalent),
            ],
        )
        .with_mapping(
            "SID001",
            [
                PredefinedTarget::new(TargetSystem::Tm2, "TM2.01", Equivalence::Equivalent),
                PredefinedTarget::new(TargetSystem::Biomedicine, "Z73.3", Equivalence::Wider),
            ],
        )
}
