use namaste_model::{
    CodeSystem, ConceptMapElement, ConceptMapGroup, ConceptMapTarget, Equivalence,
    ICD11_TM2_URI, NAMASTE_URI, TargetSelection, TargetSystem, TerminologyEntry,
};

#[test]
fn entry_deserializes_camel_case_fields() {
    let json = r#"{
        "code": "NAM005",
        "display": "Ajirna (Indigestion)",
        "definition": "Impaired digestion leading to various gastrointestinal symptoms",
        "system": "namaste",
        "tradition": "Ayurveda",
        "category": "Digestive Disorders",
        "bodySystem": "Gastrointestinal"
    }"#;
    let entry: TerminologyEntry = serde_json::from_str(json).expect("parse entry");
    assert_eq!(entry.system, CodeSystem::Namaste);
    assert_eq!(entry.body_system.as_deref(), Some("Gastrointestinal"));
    assert_eq!(entry.tradition.as_deref(), Some("Ayurveda"));
}

#[test]
fn entry_without_optional_tags() {
    let json = r#"{"code": "TM2.03", "display": "Neurological pattern", "system": "tm2"}"#;
    let entry: TerminologyEntry = serde_json::from_str(json).expect("parse entry");
    assert_eq!(entry.system, CodeSystem::Icd11(TargetSystem::Tm2));
    assert!(entry.definition.is_empty());
    assert!(entry.category.is_none());

    let out = serde_json::to_value(&entry).expect("serialize");
    assert!(out.get("bodySystem").is_none());
    assert_eq!(out["system"], "tm2");
}

#[test]
fn target_selection_round_trips_through_serde() {
    let both: TargetSelection = serde_json::from_str("\"both\"").expect("both");
    assert_eq!(both, TargetSelection::Both);
    let only: TargetSelection = serde_json::from_str("\"biomedicine\"").expect("only");
    assert_eq!(only, TargetSelection::Only(TargetSystem::Biomedicine));
    assert_eq!(serde_json::to_string(&only).unwrap(), "\"biomedicine\"");
}

#[test]
fn concept_map_group_counts_targets() {
    let mut group = ConceptMapGroup::new(TargetSystem::Tm2);
    assert_eq!(group.source, NAMASTE_URI);
    assert_eq!(group.target, ICD11_TM2_URI);
    group.element.push(ConceptMapElement {
        code: "NAM006".to_string(),
        display: "Shirahshula (Headache)".to_string(),
        target: vec![ConceptMapTarget {
            code: "TM2.03".to_string(),
            display: "Traditional Medicine Pattern - Neurological Disorders".to_string(),
            equivalence: Equivalence::Equivalent,
            comment: "Mapped via predefined method with confidence 0.90".to_string(),
        }],
    });
    assert_eq!(group.target_count(), 1);

    let json = serde_json::to_value(&group).expect("serialize group");
    assert_eq!(json["sourceVersion"], "1.0.0");
    assert_eq!(json["targetVersion"], "2023-01");
    assert_eq!(json["element"][0]["target"][0]["equivalence"], "equivalent");
}

#[test]
fn entry_uri_and_parents() {
    let entry = TerminologyEntry::new(TargetSystem::Biomedicine.into(), "K59.0", "Constipation", "")
        .with_parent("http://id.who.int/icd/release/11/2023-01/mms/K59");
    assert_eq!(entry.uri(), "http://id.who.int/icd/release/11/2023-01/mms/K59.0");

    let out = serde_json::to_value(&entry).expect("serialize");
    assert_eq!(out["parent"][0], "http://id.who.int/icd/release/11/2023-01/mms/K59");

    let bare = TerminologyEntry::new(CodeSystem::Namaste, "NAM001", "Ama", "");
    let out = serde_json::to_value(&bare).expect("serialize");
    assert!(out.get("parent").is_none());
}
