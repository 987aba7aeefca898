//! Curated NAMASTE to ICD-11 mappings.
//!
//! The table is authoritative: when it lists a source code the resolver
//! reports its targets with a fixed confidence and never searches
//! heuristically for that code. It is read-only once handed to a resolver.

use std::collections::BTreeMap;

use namaste_model::{Equivalence, TargetSystem};
use serde::{Deserialize, Serialize};

/// A curated target for one source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredefinedTarget {
    pub system: TargetSystem,
    pub code: String,
    pub equivalence: Equivalence,
}

impl PredefinedTarget {
    pub fn new(system: TargetSystem, code: impl Into<String>, equivalence: Equivalence) -> Self {
        Self {
            system,
            code: code.into(),
            equivalence,
        }
    }
}

/// Versioned lookup from source code to curated targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredefinedMappingTable {
    /// Version of the curated mapping set.
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    mappings: BTreeMap<String, Vec<PredefinedTarget>>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl PredefinedMappingTable {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            mappings: BTreeMap::new(),
        }
    }

    /// Parse a table from its JSON form.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Add curated targets for a source code, keeping any already present.
    #[must_use]
    pub fn with_mapping(
        mut self,
        source_code: impl Into<String>,
        targets: impl IntoIterator<Item = PredefinedTarget>,
    ) -> Self {
        self.mappings
            .entry(source_code.into())
            .or_default()
            .extend(targets);
        self
    }

    /// Curated targets for a source code, if the code is curated at all.
    pub fn get(&self, source_code: &str) -> Option<&[PredefinedTarget]> {
        self.mappings.get(source_code).map(Vec::as_slice)
    }

    pub fn contains(&self, source_code: &str) -> bool {
        self.mappings.contains_key(source_code)
    }

    /// The curated target matching `(system, target_code)` for a source code.
    pub fn find(
        &self,
        source_code: &str,
        system: TargetSystem,
        target_code: &str,
    ) -> Option<&PredefinedTarget> {
        self.get(source_code)?
            .iter()
            .find(|target| target.system == system && target.code == target_code)
    }

    /// Every source code curated to `(system, target_code)`, in code order.
    ///
    /// Several source codes may share a target.
    pub fn sources_for<'a>(
        &'a self,
        system: TargetSystem,
        target_code: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a PredefinedTarget)> + 'a {
        self.mappings.iter().flat_map(move |(source, targets)| {
            targets
                .iter()
                .filter(move |target| target.system == system && target.code == target_code)
                .map(move |target| (source.as_str(), target))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PredefinedTarget])> {
        self.mappings
            .iter()
            .map(|(source, targets)| (source.as_str(), targets.as_slice()))
    }

    /// Number of curated source codes.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
