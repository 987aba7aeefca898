//! FHIR-shaped JSON resources rendered by the CLI.
//!
//! These are thin envelopes around engine results, not a FHIR model: each
//! type carries only the elements the terminology operations emit.

use chrono::{DateTime, SecondsFormat, Utc};
use namaste_map::TranslateRequest;
use namaste_model::{
    CodeSystem, ConceptMapGroup, ConceptMapGroups, MappingCandidate, TerminologyEntry,
};
use namaste_standards::hash::sha256_hex;
use serde::Serialize;

pub const CONCEPT_MAP_URL: &str = "http://terminology.mohayush.gov.in/ConceptMap/namaste-to-icd11";
pub const CONCEPT_MAP_VERSION: &str = "1.0.0";
pub const PUBLISHER: &str = "Ministry of AYUSH, Government of India";
const JURISDICTION_SYSTEM: &str = "urn:iso:std:iso:3166";

pub(crate) fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// First 8 hex characters of the sha256 of `bytes`.
pub(crate) fn short_digest(bytes: &[u8]) -> String {
    sha256_hex(bytes)[..8].to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coding {
    pub system: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Coding {
    pub fn from_entry(entry: &TerminologyEntry) -> Self {
        Self {
            system: entry.system.uri().to_string(),
            code: entry.code.clone(),
            display: Some(entry.display.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeableConcept {
    pub coding: Vec<Coding>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParameterValue {
    #[serde(rename = "valueBoolean")]
    Boolean(bool),
    #[serde(rename = "valueCode")]
    Code(String),
    #[serde(rename = "valueCoding")]
    Coding(Coding),
    #[serde(rename = "valueDecimal")]
    Decimal(f64),
    #[serde(rename = "valueString")]
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(flatten)]
    pub value: Option<ParameterValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub part: Vec<Parameter>,
}

impl Parameter {
    pub fn value(name: &str, value: ParameterValue) -> Self {
        Self {
            name: name.to_string(),
            value: Some(value),
            part: Vec::new(),
        }
    }

    pub fn parts(name: &str, part: Vec<Parameter>) -> Self {
        Self {
            name: name.to_string(),
            value: None,
            part,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    pub resource_type: &'static str,
    pub id: String,
    pub parameter: Vec<Parameter>,
}

impl Parameters {
    /// `$translate` output: a result flag and one `match` per candidate.
    pub fn translation(request: &TranslateRequest, results: &[MappingCandidate]) -> Self {
        let mut parameter = vec![Parameter::value(
            "result",
            ParameterValue::Boolean(!results.is_empty()),
        )];
        if results.is_empty() {
            parameter.push(Parameter::value(
                "message",
                ParameterValue::String(format!(
                    "No translation found for {}#{}",
                    request.system, request.code
                )),
            ));
        }
        parameter.extend(results.iter().map(|candidate| {
            Parameter::parts(
                "match",
                vec![
                    Parameter::value(
                        "equivalence",
                        ParameterValue::Code(candidate.equivalence.to_string()),
                    ),
                    Parameter::value(
                        "concept",
                        ParameterValue::Coding(Coding::from_entry(&candidate.target)),
                    ),
                    Parameter::value(
                        "confidence",
                        ParameterValue::Decimal(candidate.confidence),
                    ),
                    Parameter::value(
                        "method",
                        ParameterValue::String(candidate.method.to_string()),
                    ),
                ],
            )
        }));

        let key = format!("{}#{}>{:?}", request.system, request.code, request.direction);
        Self {
            resource_type: "Parameters",
            id: format!("translate-{}", short_digest(key.as_bytes())),
            parameter,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMapResource {
    pub resource_type: &'static str,
    pub id: String,
    pub url: &'static str,
    pub version: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub status: &'static str,
    pub date: String,
    pub publisher: &'static str,
    pub description: &'static str,
    pub jurisdiction: Vec<CodeableConcept>,
    pub source_canonical: &'static str,
    pub group: Vec<ConceptMapGroup>,
}

impl ConceptMapResource {
    /// Wraps assembled groups. The id depends only on the group contents.
    pub fn new(groups: ConceptMapGroups, date: DateTime<Utc>) -> Result<Self, serde_json::Error> {
        let digest = short_digest(&serde_json::to_vec(&groups)?);
        Ok(Self {
            resource_type: "ConceptMap",
            id: format!("namaste-icd11-map-{digest}"),
            url: CONCEPT_MAP_URL,
            version: CONCEPT_MAP_VERSION,
            name: "NAMASTEToICD11ConceptMap",
            title: "NAMASTE to ICD-11 Concept Map",
            status: "active",
            date: timestamp(date),
            publisher: PUBLISHER,
            description: "Mapping between NAMASTE codes and ICD-11 TM2 and Biomedicine codes",
            jurisdiction: vec![CodeableConcept {
                coding: vec![Coding {
                    system: JURISDICTION_SYSTEM.to_string(),
                    code: "IN".to_string(),
                    display: Some("India".to_string()),
                }],
            }],
            source_canonical: CodeSystem::Namaste.uri(),
            group: vec![groups.tm2, groups.biomedicine],
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub code: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptProperty {
    pub code: &'static str,
    pub value_string: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeSystemConcept {
    pub code: String,
    pub display: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub definition: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property: Vec<ConceptProperty>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeSystemResource {
    pub resource_type: &'static str,
    pub id: &'static str,
    pub url: &'static str,
    pub version: &'static str,
    pub name: String,
    pub title: &'static str,
    pub status: &'static str,
    pub content: &'static str,
    pub count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property: Vec<PropertyDefinition>,
    pub concept: Vec<CodeSystemConcept>,
}

impl CodeSystemResource {
    /// A complete CodeSystem listing. NAMASTE concepts carry their tags as
    /// properties.
    pub fn new(system: CodeSystem, entries: &[TerminologyEntry]) -> Self {
        let property = if system == CodeSystem::Namaste {
            vec![
                PropertyDefinition {
                    code: "system",
                    kind: "string",
                    description: "AYUSH system (Ayurveda, Siddha, Unani)",
                },
                PropertyDefinition {
                    code: "category",
                    kind: "string",
                    description: "Disease category",
                },
                PropertyDefinition {
                    code: "bodySystem",
                    kind: "string",
                    description: "Affected body system",
                },
            ]
        } else {
            Vec::new()
        };

        let concept = entries
            .iter()
            .map(|entry| {
                let property = [
                    ("system", &entry.tradition),
                    ("category", &entry.category),
                    ("bodySystem", &entry.body_system),
                ]
                .into_iter()
                .filter_map(|(code, value)| {
                    value.as_ref().map(|value| ConceptProperty {
                        code,
                        value_string: value.clone(),
                    })
                })
                .collect();
                CodeSystemConcept {
                    code: entry.code.clone(),
                    display: entry.display.clone(),
                    definition: entry.definition.clone(),
                    property,
                }
            })
            .collect::<Vec<_>>();

        Self {
            resource_type: "CodeSystem",
            id: system.as_str(),
            url: system.uri(),
            version: system.version(),
            name: system.title().replace([' ', '-'], ""),
            title: system.title(),
            status: "active",
            content: "complete",
            count: concept.len(),
            property,
            concept,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Expansion {
    pub timestamp: String,
    pub total: usize,
    pub contains: Vec<Coding>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSetResource {
    pub resource_type: &'static str,
    pub id: String,
    pub status: &'static str,
    pub expansion: Expansion,
}

impl ValueSetResource {
    /// `$expand` output over one code system.
    pub fn expansion(
        system: CodeSystem,
        filter: &str,
        entries: &[TerminologyEntry],
        at: DateTime<Utc>,
    ) -> Self {
        let key = format!("{system}|{filter}");
        Self {
            resource_type: "ValueSet",
            id: format!("{}-expansion-{}", system.as_str(), short_digest(key.as_bytes())),
            status: "active",
            expansion: Expansion {
                timestamp: timestamp(at),
                total: entries.len(),
                contains: entries.iter().map(Coding::from_entry).collect(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptResource<'a> {
    pub resource_type: &'static str,
    pub id: &'a str,
    #[serde(flatten)]
    pub entry: &'a TerminologyEntry,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry<'a> {
    pub full_url: String,
    pub resource: ConceptResource<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleResource<'a> {
    pub resource_type: &'static str,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub timestamp: String,
    pub total: usize,
    pub entry: Vec<BundleEntry<'a>>,
}

impl<'a> BundleResource<'a> {
    /// A `searchset` bundle with one concept resource per entry.
    pub fn searchset(
        system: CodeSystem,
        query: &str,
        entries: &'a [TerminologyEntry],
        at: DateTime<Utc>,
    ) -> Self {
        let key = format!("{system}|{query}");
        Self {
            resource_type: "Bundle",
            id: format!("{}-search-{}", system.as_str(), short_digest(key.as_bytes())),
            kind: "searchset",
            timestamp: timestamp(at),
            total: entries.len(),
            entry: entries
                .iter()
                .map(|entry| BundleEntry {
                    full_url: entry.uri(),
                    resource: ConceptResource {
                        resource_type: "CodeSystem",
                        id: &entry.code,
                        entry,
                    },
                })
                .collect(),
        }
    }
}
