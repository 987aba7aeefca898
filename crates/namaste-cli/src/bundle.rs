//! Dual-coding check for FHIR transaction bundles.
//!
//! Every `Condition` in the bundle should carry both a NAMASTE and an ICD-11
//! coding. The check stamps audit metadata and a dual-coding extension on each
//! Condition and answers with a `transaction-response` bundle, led by an
//! `OperationOutcome` when any Condition falls short.

use chrono::{DateTime, Utc};
use namaste_model::{CodeSystem, MappingError};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::fhir::{short_digest, timestamp};

pub const DUAL_CODING_EXTENSION: &str =
    "http://terminology.mohayush.gov.in/StructureDefinition/dual-coding";

/// Coding coverage of one Condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionCheck {
    /// The Condition id, `unknown` when absent.
    pub id: String,
    pub has_namaste: bool,
    pub has_icd11: bool,
}

impl ConditionCheck {
    fn from_resource(resource: &Map<String, Value>) -> Self {
        let systems: Vec<CodeSystem> = resource
            .get("code")
            .and_then(|code| code.get("coding"))
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|coding| coding.get("system").and_then(Value::as_str))
            .filter_map(|system| system.parse().ok())
            .collect();
        Self {
            id: resource
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            has_namaste: systems.contains(&CodeSystem::Namaste),
            has_icd11: systems
                .iter()
                .any(|system| matches!(system, CodeSystem::Icd11(_))),
        }
    }

    pub fn dual_coded(&self) -> bool {
        self.has_namaste && self.has_icd11
    }

    fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if !self.has_namaste {
            issues.push(format!("Condition {} missing NAMASTE code", self.id));
        }
        if !self.has_icd11 {
            issues.push(format!("Condition {} missing ICD-11 code", self.id));
        }
        issues
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IssueDetails {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub severity: &'static str,
    pub code: &'static str,
    pub details: IssueDetails,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome {
    pub resource_type: &'static str,
    pub id: String,
    pub issue: Vec<Issue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    pub status: &'static str,
    pub location: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EntryResource {
    Outcome(OperationOutcome),
    Resource(Map<String, Value>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEntry {
    pub full_url: String,
    pub resource: EntryResource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<EntryResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub resource_type: &'static str,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub timestamp: String,
    pub entry: Vec<ResponseEntry>,
}

/// Outcome of [`check_bundle`].
#[derive(Debug, Clone)]
pub struct BundleCheck {
    pub response: TransactionResponse,
    pub conditions: Vec<ConditionCheck>,
}

impl BundleCheck {
    /// Warning texts in Condition order.
    pub fn issues(&self) -> Vec<String> {
        self.conditions
            .iter()
            .flat_map(ConditionCheck::issues)
            .collect()
    }

    pub fn is_compliant(&self) -> bool {
        self.conditions.iter().all(ConditionCheck::dual_coded)
    }
}

fn invalid(message: impl Into<String>) -> MappingError {
    MappingError::InvalidRequest(message.into())
}

/// Checks every Condition in `bundle` for NAMASTE plus ICD-11 coding.
///
/// Codings count when their `system` parses as a [`CodeSystem`]. Ids are
/// derived from the bundle content so the same input and `at` give the same
/// response.
///
/// # Errors
///
/// Returns [`MappingError::InvalidRequest`] when the input is not a Bundle or
/// its entries are not objects.
pub fn check_bundle(bundle: Value, at: DateTime<Utc>) -> Result<BundleCheck, MappingError> {
    let digest = short_digest(bundle.to_string().as_bytes());
    let Value::Object(mut bundle) = bundle else {
        return Err(invalid("input must be a FHIR Bundle resource"));
    };
    if bundle.get("resourceType").and_then(Value::as_str) != Some("Bundle") {
        return Err(invalid("input must be a FHIR Bundle resource"));
    }
    let entries = match bundle.remove("entry") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(invalid("Bundle.entry must be an array")),
    };

    let mut conditions = Vec::new();
    let mut processed = Vec::with_capacity(entries.len() + 1);
    for (index, entry) in entries.into_iter().enumerate() {
        let Value::Object(mut entry) = entry else {
            return Err(invalid(format!("Bundle.entry[{index}] must be an object")));
        };
        let full_url = entry
            .get("fullUrl")
            .and_then(Value::as_str)
            .map_or_else(|| format!("urn:entry:{index}"), str::to_string);
        let mut resource = match entry.remove("resource") {
            None => Map::new(),
            Some(Value::Object(resource)) => resource,
            Some(_) => {
                return Err(invalid(format!(
                    "Bundle.entry[{index}].resource must be an object"
                )));
            }
        };

        let resource_type = resource
            .get("resourceType")
            .and_then(Value::as_str)
            .map(str::to_string);
        if resource_type.as_deref() == Some("Condition") {
            let check = ConditionCheck::from_resource(&resource);
            stamp_condition(&mut resource, check.dual_coded(), at);
            conditions.push(check);
        }

        let id = resource
            .get("id")
            .and_then(Value::as_str)
            .map_or_else(|| short_digest(format!("{digest}|{index}").as_bytes()), str::to_string);
        processed.push(ResponseEntry {
            full_url,
            resource: EntryResource::Resource(resource),
            response: Some(EntryResponse {
                status: "201 Created",
                location: format!("{}/{id}", resource_type.as_deref().unwrap_or("Condition")),
            }),
        });
    }

    let issues: Vec<String> = conditions.iter().flat_map(ConditionCheck::issues).collect();
    if !issues.is_empty() {
        processed.insert(
            0,
            ResponseEntry {
                full_url: format!("urn:outcome:{digest}"),
                resource: EntryResource::Outcome(OperationOutcome {
                    resource_type: "OperationOutcome",
                    id: format!("outcome-{digest}"),
                    issue: issues
                        .into_iter()
                        .map(|text| Issue {
                            severity: "warning",
                            code: "business-rule",
                            details: IssueDetails { text },
                        })
                        .collect(),
                }),
                response: None,
            },
        );
    }

    Ok(BundleCheck {
        response: TransactionResponse {
            resource_type: "Bundle",
            id: format!("bundle-response-{digest}"),
            kind: "transaction-response",
            timestamp: timestamp(at),
            entry: processed,
        },
        conditions,
    })
}

fn stamp_condition(resource: &mut Map<String, Value>, dual_coded: bool, at: DateTime<Utc>) {
    let mut meta = match resource.remove("meta") {
        Some(Value::Object(meta)) => meta,
        _ => Map::new(),
    };
    meta.insert("lastUpdated".to_string(), Value::String(timestamp(at)));
    meta.insert("versionId".to_string(), Value::String("1".to_string()));
    resource.insert("meta".to_string(), Value::Object(meta));

    let mut extensions = match resource.remove("extension") {
        Some(Value::Array(extensions)) => extensions,
        _ => Vec::new(),
    };
    extensions.push(json!({
        "url": DUAL_CODING_EXTENSION,
        "valueBoolean": dual_coded,
    }));
    resource.insert("extension".to_string(), Value::Array(extensions));
}
