use std::fs;
use std::path::{Path, PathBuf};

use namaste_standards::hash::sha256_hex;
use namaste_standards::{DoctorReport, StandardsError, TerminologyRegistry};

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "namaste-terminology-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn sha(path: &Path) -> String {
    sha256_hex(&fs::read(path).unwrap())
}

const NAMASTE: &[u8] = br#"{
  "system": "namaste",
  "version": "1.0.0",
  "concepts": [
    {"code": "NAM006", "display": "Shirahshula (Headache)", "definition": "Head pain", "category": "Neurological Disorders"}
  ]
}"#;

const TM2: &[u8] = br#"{
  "system": "tm2",
  "version": "2023-01",
  "concepts": [
    {"code": "TM2.03", "display": "Traditional Medicine Pattern - Neurological Disorders"}
  ]
}"#;

const BIOMEDICINE: &[u8] = br#"{
  "system": "biomedicine",
  "version": "2023-01",
  "concepts": [
    {"code": "G44.2", "display": "Tension-type headache"},
    {"code": "R51", "display": "Headache"}
  ]
}"#;

const PREDEFINED: &[u8] = br#"{
  "version": "test",
  "mappings": {
    "NAM006": [
      {"system": "tm2", "code": "TM2.03", "equivalence": "equivalent"},
      {"system": "biomedicine", "code": "G44.2", "equivalence": "equivalent"}
    ]
  }
}"#;

/// Writes a complete terminology directory; `tamper` edits files after hashing.
fn fixture(name: &str, roles: &[(&str, &str)], tamper: impl FnOnce(&Path)) -> PathBuf {
    let dir = unique_temp_dir(name);
    write(&dir.join("namaste.json"), NAMASTE);
    write(&dir.join("icd11/tm2.json"), TM2);
    write(&dir.join("icd11/mms.json"), BIOMEDICINE);
    write(&dir.join("predefined_mappings.json"), PREDEFINED);

    let mut manifest = String::from(
        r#"[manifest]
schema = "namaste.terminology-manifest"
schema_version = 1

[pins]
namaste = "1.0.0"
icd11 = "2023-01"
"#,
    );
    for (path, role) in roles {
        manifest.push_str(&format!(
            "\n[[files]]\npath = \"{path}\"\nsha256 = \"{}\"\nrole = \"{role}\"\n",
            sha(&dir.join(path))
        ));
    }
    write(&dir.join("manifest.toml"), manifest.as_bytes());
    tamper(&dir);
    dir
}

const ALL_ROLES: &[(&str, &str)] = &[
    ("namaste.json", "namaste"),
    ("icd11/tm2.json", "tm2"),
    ("icd11/mms.json", "biomedicine"),
    ("predefined_mappings.json", "predefined_mappings"),
];

#[test]
fn verify_and_doctor_report_counts_are_stable() {
    let dir = fixture("ok", ALL_ROLES, |_| {});
    let (registry, summary) =
        TerminologyRegistry::verify_and_load(&dir).expect("verify_and_load should succeed");

    let report = DoctorReport::from_verify_summary(&summary, registry.files.clone());
    assert_eq!(report.predefined_version, "test");
    insta::assert_json_snapshot!(report.counts, @r#"
    {
      "files": 4,
      "namaste_concepts": 1,
      "tm2_concepts": 1,
      "biomedicine_concepts": 2,
      "predefined_mappings": 1
    }
    "#);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn tampered_file_fails_checksum() {
    let dir = fixture("tampered", ALL_ROLES, |dir| {
        write(&dir.join("icd11/mms.json"), b"{}");
    });
    let err = TerminologyRegistry::verify_and_load(&dir).unwrap_err();
    assert!(matches!(err, StandardsError::Sha256Mismatch { .. }), "{err}");
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn missing_role_is_rejected() {
    let dir = fixture("missing-role", &ALL_ROLES[..3], |_| {});
    let err = TerminologyRegistry::verify_and_load(&dir).unwrap_err();
    assert!(
        matches!(err, StandardsError::MissingRole { ref role } if role == "predefined_mappings"),
        "{err}"
    );
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn unlisted_file_is_rejected() {
    let dir = fixture("unexpected", ALL_ROLES, |dir| {
        write(&dir.join("notes.txt"), b"scratch");
    });
    let err = TerminologyRegistry::verify_and_load(&dir).unwrap_err();
    assert!(matches!(err, StandardsError::UnexpectedFile { .. }), "{err}");
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn role_must_match_declared_system() {
    let swapped = &[
        ("namaste.json", "namaste"),
        ("icd11/mms.json", "tm2"),
        ("icd11/tm2.json", "biomedicine"),
        ("predefined_mappings.json", "predefined_mappings"),
    ];
    let dir = fixture("swapped", swapped, |_| {});
    let err = TerminologyRegistry::verify_and_load(&dir).unwrap_err();
    assert!(matches!(err, StandardsError::InvalidManifest { .. }), "{err}");
    let _ = fs::remove_dir_all(dir);
}
