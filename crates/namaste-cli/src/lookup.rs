//! Code system lookups backing `search` and `codes`.

use namaste_model::{CodeSystem, TerminologyEntry};
use namaste_standards::TerminologyRegistry;

/// Text search within one code system, optionally narrowed to one AYUSH
/// system (`tradition`, compared case-insensitively).
///
/// At most `count` entries are returned, in vocabulary order. An ICD-11
/// search needs a filter: a blank `query` there matches nothing, while NAMASTE
/// returns every concept. `codes` lists a whole ICD-11 branch.
pub fn search_entries(
    registry: &TerminologyRegistry,
    system: CodeSystem,
    query: &str,
    tradition: Option<&str>,
    count: usize,
) -> Vec<TerminologyEntry> {
    if matches!(system, CodeSystem::Icd11(_)) && query.trim().is_empty() {
        return Vec::new();
    }
    let vocabulary = registry.vocabulary(system);
    let Some(tradition) = tradition.map(str::trim).filter(|t| !t.is_empty()) else {
        return vocabulary.search(query, count);
    };
    vocabulary
        .search(query, vocabulary.len())
        .into_iter()
        .filter(|entry| {
            entry
                .tradition
                .as_deref()
                .is_some_and(|value| value.eq_ignore_ascii_case(tradition))
        })
        .take(count)
        .collect()
}
