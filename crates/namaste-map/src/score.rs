//! Similarity scoring between a concept and a candidate concept.
//!
//! Uses the normalized Indel similarity (the longest-common-subsequence ratio)
//! on display and definition text, plus a bonus for clinically generic
//! keywords that appear on both sides.

use namaste_model::TerminologyEntry;
use rapidfuzz::distance::indel;

/// Weight of the display text ratio.
pub const DISPLAY_WEIGHT: f64 = 0.4;
/// Weight of the definition text ratio.
pub const DEFINITION_WEIGHT: f64 = 0.4;
/// Weight of the shared keyword bonus.
pub const KEYWORD_WEIGHT: f64 = 0.2;
/// Bonus added per shared keyword, before weighting.
const KEYWORD_STEP: f64 = 0.1;

/// Generic clinical terms that earn a bonus when both texts mention them.
pub const CLINICAL_KEYWORDS: [&str; 11] = [
    "pain",
    "disorder",
    "syndrome",
    "disease",
    "condition",
    "digestive",
    "neurological",
    "constitutional",
    "headache",
    "indigestion",
    "imbalance",
];

/// Score for a single concept pair.
#[derive(Debug, Clone)]
pub struct SimilarityScore {
    /// Final confidence score (0.0 to 1.0).
    pub score: f64,
    /// Breakdown of score components for explainability.
    pub explanation: Vec<ScoreComponent>,
}

impl SimilarityScore {
    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        self.explanation
            .iter()
            .map(|c| format!("{}: {:.0}%", c.name, c.value * 100.0))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A component contributing to the final score.
#[derive(Debug, Clone)]
pub struct ScoreComponent {
    /// Component name (e.g., "Display similarity").
    pub name: &'static str,
    /// Unweighted component value.
    pub value: f64,
    /// Human-readable description.
    pub description: String,
}

/// Scores how closely a candidate entry matches a source entry.
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    keywords: Vec<String>,
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::with_keywords(CLINICAL_KEYWORDS)
    }
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scorer with a custom keyword vocabulary.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Score `candidate` against `source`, in `[0.0, 1.0]`.
    pub fn score(&self, source: &TerminologyEntry, candidate: &TerminologyEntry) -> f64 {
        self.score_with_explanation(source, candidate).score
    }

    /// Score with a per-component breakdown.
    pub fn score_with_explanation(
        &self,
        source: &TerminologyEntry,
        candidate: &TerminologyEntry,
    ) -> SimilarityScore {
        let display = text_ratio(&source.display, &candidate.display);
        let definition = text_ratio(&source.definition, &candidate.definition);
        let (bonus, shared) = self.keyword_bonus(source, candidate);

        let score = (display * DISPLAY_WEIGHT
            + definition * DEFINITION_WEIGHT
            + bonus * KEYWORD_WEIGHT)
            .clamp(0.0, 1.0);

        let explanation = vec![
            ScoreComponent {
                name: "Display similarity",
                value: display,
                description: format!("'{}' vs '{}'", source.display, candidate.display),
            },
            ScoreComponent {
                name: "Definition similarity",
                value: definition,
                description: format!(
                    "{} vs {} characters",
                    source.definition.chars().count(),
                    candidate.definition.chars().count()
                ),
            },
            ScoreComponent {
                name: "Keyword bonus",
                value: bonus,
                description: if shared.is_empty() {
                    "No shared keywords".to_string()
                } else {
                    format!("Shared: {}", shared.join(", "))
                },
            },
        ];

        SimilarityScore { score, explanation }
    }

    fn keyword_bonus<'a>(
        &'a self,
        source: &TerminologyEntry,
        candidate: &TerminologyEntry,
    ) -> (f64, Vec<&'a str>) {
        let source_text = source.text().to_lowercase();
        let candidate_text = candidate.text().to_lowercase();
        let shared: Vec<&str> = self
            .keywords
            .iter()
            .map(String::as_str)
            .filter(|keyword| source_text.contains(keyword) && candidate_text.contains(keyword))
            .collect();
        let bonus = (shared.len() as f64 * KEYWORD_STEP).min(1.0);
        (bonus, shared)
    }
}

/// Case-insensitive sequence similarity ratio; 1.0 means identical text.
pub fn text_ratio(left: &str, right: &str) -> f64 {
    let left = left.to_lowercase();
    let right = right.to_lowercase();
    indel::normalized_similarity(left.chars(), right.chars()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use namaste_model::{CodeSystem, TargetSystem};

    use super::*;

    fn namaste(display: &str, definition: &str) -> TerminologyEntry {
        TerminologyEntry::new(CodeSystem::Namaste, "NAM", display, definition)
    }

    fn icd(display: &str, definition: &str) -> TerminologyEntry {
        TerminologyEntry::new(TargetSystem::Biomedicine.into(), "X", display, definition)
    }

    #[test]
    fn identical_entries_score_at_least_equivalent() {
        let entry = namaste("Vata Dosha Imbalance", "Constitutional imbalance of Vata dosha");
        let score = SimilarityScorer::new().score(&entry, &entry);
        assert!(score >= 0.8, "self score should be >= 0.8, got {score}");
        assert!(score <= 1.0);
    }

    #[test]
    fn text_ratio_is_case_insensitive() {
        assert_eq!(text_ratio("Headache", "HEADACHE"), 1.0);
        assert_eq!(text_ratio("", ""), 1.0);
        assert_eq!(text_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn keyword_bonus_counts_shared_terms_only() {
        let scorer = SimilarityScorer::new();
        let source = namaste("Shirahshula (Headache)", "Head pain due to doshic imbalance");
        let candidate = icd("Tension-type headache", "Bilateral pain");
        let score = scorer.score_with_explanation(&source, &candidate);
        let bonus = &score.explanation[2];
        // "pain" and "headache" are shared, "imbalance" is not
        assert!((bonus.value - 0.2).abs() < 1e-9, "bonus was {}", bonus.value);
        assert_eq!(bonus.description, "Shared: pain, headache");
    }

    #[test]
    fn keywords_are_normalized() {
        let scorer = SimilarityScorer::with_keywords(["  Fever ", "", "COUGH"]);
        assert_eq!(scorer.keywords(), ["fever", "cough"]);
        assert_eq!(SimilarityScorer::new().keywords().len(), CLINICAL_KEYWORDS.len());
    }

    #[test]
    fn keyword_bonus_is_capped() {
        let scorer = SimilarityScorer::with_keywords((0..15).map(|i| format!("k{i:02}")));
        let text = (0..15).map(|i| format!("k{i:02}")).collect::<Vec<_>>().join(" ");
        let source = namaste(&text, "");
        let candidate = icd("unrelated", &text);
        let score = scorer.score_with_explanation(&source, &candidate);
        assert_eq!(score.explanation[2].value, 1.0);
        assert!(score.score <= 1.0);
    }

    #[test]
    fn explanation_names_components() {
        let entry = namaste("Ama", "Undigested food");
        let explanation = SimilarityScorer::new()
            .score_with_explanation(&entry, &entry)
            .explain();
        assert!(explanation.contains("Display similarity: 100%"));
        assert!(explanation.contains("Keyword bonus: 0%"));
    }
}
