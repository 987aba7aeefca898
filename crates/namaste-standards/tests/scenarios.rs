use namaste_map::{ConceptMapAssembler, MappingOptions};
use namaste_model::{Equivalence, MappingMethod, Recommendation, TargetSelection, TargetSystem};
use namaste_standards::load_default_registry;

#[test]
fn ajirna_maps_to_functional_dyspepsia() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let results = registry
        .resolver(MappingOptions::default())
        .translate_forward("NAM005", TargetSelection::Only(TargetSystem::Biomedicine))
        .expect("translate");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].target.code, "K30");
    assert_eq!(results[0].equivalence, Equivalence::Equivalent);
    assert_eq!(results[0].method, MappingMethod::Predefined);
    assert_eq!(results[0].confidence, 0.9);
}

#[test]
fn shirahshula_maps_to_neurological_pattern() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let results = registry
        .resolver(MappingOptions::default())
        .translate_forward("NAM006", TargetSelection::Only(TargetSystem::Tm2))
        .expect("translate");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].target.code, "TM2.03");
    assert_eq!(results[0].equivalence, Equivalence::Equivalent);
    assert_eq!(results[0].confidence, 0.9);
}

#[test]
fn vata_to_stress_is_accepted() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let validation = registry
        .resolver(MappingOptions::default())
        .validate_mapping("NAM002", "Z73.3", TargetSystem::Biomedicine)
        .expect("validate");
    assert!(validation.valid);
    assert_eq!(validation.recommendation, Recommendation::Accept);
    assert_eq!(validation.equivalence, Equivalence::Wider);
}

#[test]
fn uncurated_validation_uses_similarity() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let validation = registry
        .resolver(MappingOptions::default())
        .validate_mapping("NAM006", "K59.0", TargetSystem::Biomedicine)
        .expect("validate");
    assert_eq!(validation.method, MappingMethod::Automatic);
    assert!(validation.confidence < 0.9);
    assert_eq!(validation.equivalence, namaste_map::classify(validation.confidence));
}

#[test]
fn constipation_has_no_reverse_mapping() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let results = registry
        .resolver(MappingOptions::default())
        .translate_reverse("K59.0", TargetSystem::Biomedicine)
        .expect("translate");
    assert!(results.is_empty());
}

#[test]
fn shared_curated_targets_map_back_to_every_source() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let resolver = registry.resolver(MappingOptions::default());

    let stress = resolver
        .translate_reverse("Z73.3", TargetSystem::Biomedicine)
        .expect("translate");
    let codes: Vec<&str> = stress.iter().map(|c| c.target.code.as_str()).collect();
    assert_eq!(
        codes,
        vec!["NAM002", "NAM003", "NAM004", "SID001", "SID002", "UNA001"]
    );

    let digestive = resolver
        .translate_reverse("TM2.02", TargetSystem::Tm2)
        .expect("translate");
    let codes: Vec<&str> = digestive.iter().map(|c| c.target.code.as_str()).collect();
    assert_eq!(codes, vec!["NAM001", "NAM005", "UNA002"]);
}

#[test]
fn concept_map_covers_whole_vocabulary() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let resolver = registry.resolver(MappingOptions::default());
    let entries = registry.namaste.entries();
    let groups = ConceptMapAssembler::new(&resolver)
        .assemble(entries)
        .expect("assemble");

    assert_eq!(groups.tm2.element.len(), 10);
    assert_eq!(groups.biomedicine.element.len(), 10);
    assert_eq!(groups.tm2.element[9].code, "NAM006");
    assert_eq!(groups.biomedicine.element[9].target[0].code, "G44.2");
    assert_eq!(groups.biomedicine.target_count(), 10);

    let again = resolver.assemble(entries).expect("assemble");
    assert_eq!(groups, again);
}
