use namaste_model::{CodeSystem, TargetSystem, TerminologyProvider};
use namaste_standards::load_default_registry;

#[test]
fn loads_shipped_terminology() {
    let (registry, summary) = load_default_registry().expect("verify and load terminology");
    assert_eq!(summary.file_count, 4);
    assert_eq!(summary.namaste_concepts, 10);
    assert_eq!(summary.tm2_concepts, 3);
    assert_eq!(summary.biomedicine_concepts, 4);
    assert_eq!(summary.predefined_mappings, 10);
    assert_eq!(summary.manifest_pins.icd11, "2023-01");

    for entry in registry.namaste.entries() {
        assert!(
            registry.predefined.contains(&entry.code),
            "{} has no curated mapping",
            entry.code
        );
    }
}

#[test]
fn namaste_entries_carry_tags() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let entry = registry
        .namaste
        .get_by_code("SID001", CodeSystem::Namaste)
        .unwrap()
        .expect("SID001");
    assert_eq!(entry.display, "Vatham Imbalance");
    assert_eq!(entry.tradition.as_deref(), Some("Siddha"));
    assert_eq!(entry.category.as_deref(), Some("Constitutional Disorders"));
    assert_eq!(entry.body_system.as_deref(), Some("Nervous System"));
}

#[test]
fn every_curated_target_exists() {
    let (registry, _) = load_default_registry().expect("load terminology");
    for (source, targets) in registry.predefined.iter() {
        for target in targets {
            let found = registry
                .icd11
                .get_by_code(&target.code, target.system.into())
                .unwrap();
            assert!(found.is_some(), "{source} -> {} missing", target.code);
        }
    }
}

#[test]
fn icd11_search_is_scoped_to_branch() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let tm2 = registry
        .icd11
        .search("pattern", TargetSystem::Tm2.into(), 10)
        .unwrap();
    assert_eq!(tm2.len(), 3);
    let bio = registry
        .icd11
        .search("pattern", TargetSystem::Biomedicine.into(), 10)
        .unwrap();
    assert!(bio.is_empty());
}

#[test]
fn vocabulary_lookup_by_system() {
    let (registry, _) = load_default_registry().expect("load terminology");
    assert_eq!(registry.vocabulary(CodeSystem::Namaste).len(), 10);
    let tm2 = registry.vocabulary(TargetSystem::Tm2.into());
    assert_eq!(tm2.version(), "2023-01");
    assert!(tm2.get("TM2.01").is_some());
    assert!(registry.vocabulary(TargetSystem::Biomedicine.into()).get("TM2.01").is_none());
}

#[test]
fn shipped_hierarchy() {
    let (registry, _) = load_default_registry().expect("load terminology");

    let tm2 = registry.vocabulary(TargetSystem::Tm2.into());
    let pattern = tm2.hierarchy("TM2.01").expect("TM2.01 is shipped");
    assert_eq!(pattern.parents.len(), 1);
    assert_eq!(pattern.parents[0].uri, "http://id.who.int/icd/release/11/2023-01/tm2");
    assert_eq!(pattern.parents[0].code, None);
    assert!(pattern.children.is_empty());

    let bio = registry.vocabulary(TargetSystem::Biomedicine.into());
    let constipation = bio.hierarchy("K59.0").expect("K59.0 is shipped");
    assert_eq!(constipation.parents[0].code.as_deref(), Some("K59"));
    assert!(constipation.parents[0].entry.is_none());
    assert!(constipation.is_leaf());

    let dyspepsia = bio.hierarchy("K30").expect("K30 is shipped");
    assert!(dyspepsia.parents.is_empty());
    assert!(dyspepsia.children.is_empty());

    assert!(bio.hierarchy("TM2.01").is_none());
}
