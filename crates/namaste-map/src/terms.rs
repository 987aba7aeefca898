//! Search term extraction for heuristic lookups.
//!
//! A NAMASTE entry is turned into a set of free-text queries: its main name
//! plus expansion terms triggered by keywords in its category, body system
//! and display text.

use std::collections::BTreeSet;

use namaste_model::TerminologyEntry;

/// Entry field a taxonomy rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermField {
    Category,
    BodySystem,
    Display,
}

/// Adds `terms` when `field` contains `keyword` (case-insensitive).
#[derive(Debug, Clone)]
pub struct TermRule {
    pub field: TermField,
    pub keyword: String,
    pub terms: Vec<String>,
}

impl TermRule {
    pub fn new(field: TermField, keyword: &str, terms: &[&str]) -> Self {
        Self {
            field,
            keyword: keyword.to_lowercase(),
            terms: terms.iter().map(|term| term.to_lowercase()).collect(),
        }
    }
}

const DEFAULT_RULES: &[(TermField, &str, &[&str])] = &[
    (TermField::Category, "digestive", &["digestion", "stomach", "gastric"]),
    (TermField::Category, "constitutional", &["constitutional", "temperament", "pattern"]),
    (TermField::Category, "neurological", &["neurological", "nervous", "brain"]),
    (TermField::BodySystem, "gastrointestinal", &["gastrointestinal", "digestive"]),
    (TermField::BodySystem, "nervous", &["nervous", "neurological"]),
    (TermField::Display, "headache", &["headache", "cephalgia"]),
    (TermField::Display, "indigestion", &["indigestion", "dyspepsia"]),
    (TermField::Display, "dosha", &["constitutional", "pattern"]),
];

/// Keyword table driving search term expansion.
#[derive(Debug, Clone)]
pub struct SearchTermTaxonomy {
    rules: Vec<TermRule>,
}

impl Default for SearchTermTaxonomy {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES
                .iter()
                .map(|(field, keyword, terms)| TermRule::new(*field, keyword, terms))
                .collect(),
        }
    }
}

impl SearchTermTaxonomy {
    /// A taxonomy with no expansion rules; only the main name is extracted.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    #[must_use]
    pub fn with_rule(mut self, rule: TermRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[TermRule] {
        &self.rules
    }

    /// Extract the deduplicated search terms for `entry`.
    ///
    /// All matching rules contribute; rule order does not matter.
    pub fn extract(&self, entry: &TerminologyEntry) -> BTreeSet<String> {
        let display = entry.display.to_lowercase();
        let category = entry.category.as_deref().unwrap_or_default().to_lowercase();
        let body_system = entry
            .body_system
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        let mut terms = BTreeSet::new();
        let main_term = main_term(&display);
        if !main_term.is_empty() {
            terms.insert(main_term.to_string());
        }

        for rule in &self.rules {
            let haystack = match rule.field {
                TermField::Category => &category,
                TermField::BodySystem => &body_system,
                TermField::Display => &display,
            };
            if haystack.contains(&rule.keyword) {
                terms.extend(rule.terms.iter().cloned());
            }
        }
        terms
    }
}

/// Extract search terms with the default taxonomy.
pub fn extract_search_terms(entry: &TerminologyEntry) -> BTreeSet<String> {
    SearchTermTaxonomy::default().extract(entry)
}

/// The part of a display name before any parenthesis, trimmed.
fn main_term(display: &str) -> &str {
    display.split(['(', ')']).next().unwrap_or_default().trim()
}
