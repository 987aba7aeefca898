use namaste_cli::lookup::search_entries;
use namaste_model::{CodeSystem, TargetSystem};
use namaste_standards::load_default_registry;

#[test]
fn tradition_filter_is_case_insensitive() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let siddha = search_entries(&registry, CodeSystem::Namaste, "", Some("siddha"), 50);
    let codes: Vec<&str> = siddha.iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, vec!["SID001", "SID002"]);

    let first = search_entries(&registry, CodeSystem::Namaste, "", Some("SIDDHA"), 1);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].code, "SID001");
}

#[test]
fn blank_tradition_does_not_filter() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let all = search_entries(&registry, CodeSystem::Namaste, "", Some("  "), 50);
    assert_eq!(all.len(), 10);
}

#[test]
fn icd11_entries_have_no_tradition() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let system = CodeSystem::Icd11(TargetSystem::Tm2);
    assert_eq!(search_entries(&registry, system, "TM2", None, 50).len(), 3);
    assert!(search_entries(&registry, system, "TM2", Some("Ayurveda"), 50).is_empty());
}

#[test]
fn icd11_search_without_filter_is_empty() {
    let (registry, _) = load_default_registry().expect("load terminology");
    for target in [TargetSystem::Tm2, TargetSystem::Biomedicine] {
        let system = CodeSystem::Icd11(target);
        assert!(search_entries(&registry, system, "", None, 50).is_empty());
        assert!(search_entries(&registry, system, "   ", None, 50).is_empty());
    }
    let bio = search_entries(
        &registry,
        CodeSystem::Icd11(TargetSystem::Biomedicine),
        "constipation",
        None,
        50,
    );
    assert_eq!(bio.len(), 1);
    assert_eq!(bio[0].code, "K59.0");
}
