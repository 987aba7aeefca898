use chrono::{TimeZone, Utc};
use namaste_cli::exit_code;
use namaste_cli::fhir::{
    BundleResource, CONCEPT_MAP_URL, CodeSystemResource, ConceptMapResource, Parameters,
    ValueSetResource,
};
use namaste_map::{MappingOptions, TranslateRequest};
use namaste_model::{
    CodeSystem, MappingError, NAMASTE_URI, ProviderError, TargetSystem,
};
use namaste_standards::load_default_registry;

#[test]
fn translation_without_matches_reports_message() {
    let request = TranslateRequest::parse("NAM999", "namaste", None).expect("parse");
    let parameters = Parameters::translation(&request, &[]);
    insta::assert_json_snapshot!(parameters, @r#"
    {
      "resourceType": "Parameters",
      "id": "translate-e3c91507",
      "parameter": [
        {
          "name": "result",
          "valueBoolean": false
        },
        {
          "name": "message",
          "valueString": "No translation found for namaste#NAM999"
        }
      ]
    }
    "#);
}

#[test]
fn translation_match_carries_concept_and_confidence() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let request = TranslateRequest::parse("NAM005", "namaste", Some("biomedicine")).expect("parse");
    let results = registry
        .resolver(MappingOptions::default())
        .translate(&request)
        .expect("translate");
    let json = serde_json::to_value(Parameters::translation(&request, &results)).unwrap();

    assert_eq!(json["parameter"][0]["valueBoolean"], true);
    let parts = &json["parameter"][1]["part"];
    assert_eq!(json["parameter"][1]["name"], "match");
    assert_eq!(parts[0]["valueCode"], "equivalent");
    assert_eq!(parts[1]["valueCoding"]["code"], "K30");
    assert_eq!(
        parts[1]["valueCoding"]["system"],
        TargetSystem::Biomedicine.uri()
    );
    assert_eq!(parts[2]["valueDecimal"], 0.9);
    assert_eq!(parts[3]["valueString"], "predefined");
}

#[test]
fn concept_map_id_depends_only_on_groups() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let groups = registry
        .resolver(MappingOptions::default())
        .assemble(registry.namaste.entries())
        .expect("assemble");

    let first = ConceptMapResource::new(
        groups.clone(),
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
    )
    .unwrap();
    let second = ConceptMapResource::new(groups, Utc::now()).unwrap();

    assert_eq!(first.id, second.id);
    assert!(first.id.starts_with("namaste-icd11-map-"));
    assert_eq!(first.id.len(), "namaste-icd11-map-".len() + 8);
    assert_eq!(first.date, "2026-01-02T03:04:05Z");

    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(json["resourceType"], "ConceptMap");
    assert_eq!(json["url"], CONCEPT_MAP_URL);
    assert_eq!(json["sourceCanonical"], NAMASTE_URI);
    assert_eq!(json["jurisdiction"][0]["coding"][0]["code"], "IN");
    assert_eq!(json["group"].as_array().unwrap().len(), 2);
    assert_eq!(json["group"][0]["target"], TargetSystem::Tm2.uri());
    assert_eq!(json["group"][1]["sourceVersion"], "1.0.0");
}

#[test]
fn namaste_code_system_declares_tag_properties() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let resource = CodeSystemResource::new(CodeSystem::Namaste, registry.namaste.entries());
    assert_eq!(resource.count, 10);
    assert_eq!(resource.name, "NAMASTE");

    let json = serde_json::to_value(&resource).unwrap();
    let declared: Vec<&str> = json["property"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["code"].as_str().unwrap())
        .collect();
    assert_eq!(declared, vec!["system", "category", "bodySystem"]);

    let sid = json["concept"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["code"] == "SID001")
        .expect("SID001");
    assert_eq!(sid["property"][0]["code"], "system");
    assert_eq!(sid["property"][0]["valueString"], "Siddha");
}

#[test]
fn icd11_code_system_has_no_properties() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let system = CodeSystem::Icd11(TargetSystem::Tm2);
    let resource = CodeSystemResource::new(system, registry.vocabulary(system).entries());
    assert_eq!(resource.name, "ICD11TraditionalMedicineModule2");
    let json = serde_json::to_value(&resource).unwrap();
    assert!(json.get("property").is_none());
    assert_eq!(json["count"], 3);
}

#[test]
fn search_outputs_list_codings_and_concepts() {
    let (registry, _) = load_default_registry().expect("load terminology");
    let entries = registry.vocabulary(CodeSystem::Namaste).search("indigestion", 50);
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();

    let value_set = serde_json::to_value(ValueSetResource::expansion(
        CodeSystem::Namaste,
        "indigestion",
        &entries,
        at,
    ))
    .unwrap();
    assert_eq!(value_set["expansion"]["total"], entries.len());
    assert_eq!(value_set["expansion"]["contains"][0]["system"], NAMASTE_URI);
    assert_eq!(value_set["expansion"]["timestamp"], "2026-03-01T00:00:00Z");

    let bundle = serde_json::to_value(BundleResource::searchset(
        CodeSystem::Namaste,
        "indigestion",
        &entries,
        at,
    ))
    .unwrap();
    assert_eq!(bundle["type"], "searchset");
    let first = &bundle["entry"][0];
    let code = first["resource"]["code"].as_str().unwrap();
    assert_eq!(
        first["fullUrl"].as_str().unwrap(),
        format!("{NAMASTE_URI}/{code}")
    );
    assert_eq!(first["resource"]["id"], code);
}

#[test]
fn client_errors_exit_with_two() {
    let err = anyhow::Error::from(MappingError::not_found(CodeSystem::Namaste, "NAM999"))
        .context("translate namaste#NAM999");
    assert_eq!(exit_code(&err), 2);

    let err = anyhow::Error::from(MappingError::UnsupportedSystem("snomed".to_string()));
    assert_eq!(exit_code(&err), 2);

    let err = anyhow::Error::from(MappingError::from(ProviderError::Unavailable(
        "terminology service down".to_string(),
    )));
    assert_eq!(exit_code(&err), 1);

    assert_eq!(exit_code(&anyhow::anyhow!("disk full")), 1);
}
