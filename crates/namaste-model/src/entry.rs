use serde::{Deserialize, Serialize};

use crate::system::CodeSystem;

/// A coded concept in either vocabulary, as returned by a provider lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminologyEntry {
    pub code: String,
    pub display: String,
    #[serde(default)]
    pub definition: String,
    pub system: CodeSystem,
    /// AYUSH system of a NAMASTE code (Ayurveda, Siddha, Unani).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tradition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_system: Option<String>,
    /// URIs of the broader concepts this code sits under.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent: Vec<String>,
}

impl TerminologyEntry {
    pub fn new(
        system: CodeSystem,
        code: impl Into<String>,
        display: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            display: display.into(),
            definition: definition.into(),
            system,
            tradition: None,
            category: None,
            body_system: None,
            parent: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tradition(mut self, tradition: impl Into<String>) -> Self {
        self.tradition = Some(tradition.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_body_system(mut self, body_system: impl Into<String>) -> Self {
        self.body_system = Some(body_system.into());
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent.push(parent.into());
        self
    }

    /// Concept URI: the code system URI followed by `/{code}`.
    pub fn uri(&self) -> String {
        format!("{}/{}", self.system.uri(), self.code)
    }

    /// Display and definition joined for keyword scans.
    pub fn text(&self) -> String {
        format!("{} {}", self.display, self.definition)
    }
}
