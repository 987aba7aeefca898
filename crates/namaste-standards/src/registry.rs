#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use namaste_map::{MappingOptions, MappingResolver, PredefinedMappingTable};
use namaste_model::{CodeSystem, TargetSystem};
use tracing::{debug, info};

use crate::error::StandardsError;
use crate::hash::sha256_hex;
use crate::loaders::{load_predefined_mappings, load_vocabulary};
use crate::manifest::{FileRole, Manifest, ManifestFile, Pins};
use crate::provider::{Icd11Terminology, SourceVocabulary, Vocabulary};

const MANIFEST_SCHEMA: &str = "namaste.terminology-manifest";

#[derive(Debug, Clone, serde::Serialize)]
pub struct VerifySummary {
    pub terminology_dir: PathBuf,
    pub manifest_pins: Pins,
    pub file_count: usize,
    pub namaste_concepts: usize,
    pub tm2_concepts: usize,
    pub biomedicine_concepts: usize,
    pub predefined_mappings: usize,
    pub predefined_version: String,
}

/// Verified terminology data: both providers plus the curated mappings.
#[derive(Debug, Clone)]
pub struct TerminologyRegistry {
    pub manifest: Manifest,
    pub files: Vec<ManifestFile>,
    pub namaste: SourceVocabulary,
    pub icd11: Icd11Terminology,
    pub predefined: PredefinedMappingTable,
}

impl TerminologyRegistry {
    pub fn verify_and_load(
        terminology_dir: &Path,
    ) -> Result<(Self, VerifySummary), StandardsError> {
        let manifest = load_manifest(&terminology_dir.join("manifest.toml"))?;

        validate_manifest(&manifest, terminology_dir)?;

        let mut files = manifest.files.clone();
        files.sort_by(|a, b| a.path.cmp(&b.path));

        for file in &files {
            verify_file(terminology_dir, file)?;
        }
        debug!(files = files.len(), "verified terminology checksums");

        let namaste = SourceVocabulary::new(load_role_vocabulary(
            terminology_dir,
            &files,
            FileRole::Namaste,
        )?)?;
        let icd11 = Icd11Terminology::new(
            load_role_vocabulary(terminology_dir, &files, FileRole::Tm2)?,
            load_role_vocabulary(terminology_dir, &files, FileRole::Biomedicine)?,
        )?;
        let predefined = load_predefined_mappings(&resolve_role_path(
            terminology_dir,
            &files,
            FileRole::PredefinedMappings,
        )?)?;

        let summary = VerifySummary {
            terminology_dir: terminology_dir.to_path_buf(),
            manifest_pins: manifest.pins.clone(),
            file_count: files.len(),
            namaste_concepts: namaste.vocabulary().len(),
            tm2_concepts: icd11.branch(TargetSystem::Tm2).len(),
            biomedicine_concepts: icd11.branch(TargetSystem::Biomedicine).len(),
            predefined_mappings: predefined.len(),
            predefined_version: predefined.version.clone(),
        };
        info!(
            namaste = summary.namaste_concepts,
            tm2 = summary.tm2_concepts,
            biomedicine = summary.biomedicine_concepts,
            predefined = summary.predefined_mappings,
            "loaded terminology"
        );

        Ok((
            Self {
                manifest,
                files,
                namaste,
                icd11,
                predefined,
            },
            summary,
        ))
    }

    /// The loaded vocabulary of `system`.
    pub fn vocabulary(&self, system: CodeSystem) -> &Vocabulary {
        match system {
            CodeSystem::Namaste => self.namaste.vocabulary(),
            CodeSystem::Icd11(target) => self.icd11.branch(target),
        }
    }

    /// A resolver borrowing this registry's providers and curated mappings.
    pub fn resolver(
        &self,
        options: MappingOptions,
    ) -> MappingResolver<&SourceVocabulary, &Icd11Terminology> {
        MappingResolver::new(&self.namaste, &self.icd11, self.predefined.clone())
            .with_options(options)
    }
}

fn load_manifest(path: &Path) -> Result<Manifest, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| StandardsError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_manifest(manifest: &Manifest, terminology_dir: &Path) -> Result<(), StandardsError> {
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(StandardsError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != 1 {
        return Err(StandardsError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }

    let mut roles: BTreeSet<FileRole> = BTreeSet::new();
    let mut manifest_paths: BTreeSet<PathBuf> = BTreeSet::new();

    for file in &manifest.files {
        if !roles.insert(file.role) {
            return Err(StandardsError::DuplicateRole {
                role: file.role.to_string(),
            });
        }

        validate_sha(&file.sha256, &file.path)?;

        let path = validate_path(&file.path)?;
        manifest_paths.insert(normalize_path(&path));
    }

    for role in FileRole::ALL {
        if !roles.contains(&role) {
            return Err(StandardsError::MissingRole {
                role: role.to_string(),
            });
        }
    }

    for path in list_files_under(terminology_dir)? {
        if path == Path::new("manifest.toml") {
            continue;
        }
        if !manifest_paths.contains(&normalize_path(&path)) {
            return Err(StandardsError::UnexpectedFile {
                path: terminology_dir.join(path),
            });
        }
    }

    Ok(())
}

fn verify_file(terminology_dir: &Path, file: &ManifestFile) -> Result<(), StandardsError> {
    let full_path = terminology_dir.join(&file.path);
    let bytes = std::fs::read(&full_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StandardsError::MissingFile {
                path: full_path.clone(),
            }
        } else {
            StandardsError::io(full_path.clone(), e)
        }
    })?;

    let actual = sha256_hex(&bytes);
    let expected = file.sha256.to_ascii_lowercase();
    if actual != expected {
        return Err(StandardsError::Sha256Mismatch {
            path: full_path,
            expected,
            actual,
        });
    }
    Ok(())
}

fn resolve_role_path(
    terminology_dir: &Path,
    files: &[ManifestFile],
    role: FileRole,
) -> Result<PathBuf, StandardsError> {
    let f = files
        .iter()
        .find(|f| f.role == role)
        .ok_or_else(|| StandardsError::MissingRole {
            role: role.to_string(),
        })?;
    Ok(terminology_dir.join(&f.path))
}

fn load_role_vocabulary(
    terminology_dir: &Path,
    files: &[ManifestFile],
    role: FileRole,
) -> Result<Vocabulary, StandardsError> {
    let path = resolve_role_path(terminology_dir, files, role)?;
    let vocabulary = load_vocabulary(&path)?;
    if Some(vocabulary.system()) != role.code_system() {
        return Err(StandardsError::InvalidManifest {
            message: format!(
                "{} is listed as {role} but declares system {}",
                path.display(),
                vocabulary.system()
            ),
        });
    }
    Ok(vocabulary)
}

fn validate_sha(sha: &str, path: &str) -> Result<(), StandardsError> {
    if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(StandardsError::InvalidSha256 {
            path: PathBuf::from(path),
            message: "sha256 must be 64 hex characters".to_string(),
        });
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<PathBuf, StandardsError> {
    if path.contains('\\') {
        return Err(StandardsError::InvalidPath {
            path: PathBuf::from(path),
            message: "manifest path must use '/' separators".to_string(),
        });
    }

    let p = PathBuf::from(path);
    if p.is_absolute() {
        return Err(StandardsError::InvalidPath {
            path: p,
            message: "manifest path must be relative".to_string(),
        });
    }

    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(StandardsError::InvalidPath {
            path: p,
            message: "manifest path must not traverse out of terminology/".to_string(),
        });
    }

    Ok(p)
}

fn list_files_under(root: &Path) -> Result<BTreeSet<PathBuf>, StandardsError> {
    let mut stack = vec![root.to_path_buf()];
    let mut files = BTreeSet::new();

    while let Some(dir) = stack.pop() {
        for entry in std::fs::read_dir(&dir).map_err(|e| StandardsError::io(&dir, e))? {
            let entry = entry.map_err(|e| StandardsError::io(&dir, e))?;
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.is_file() {
                let rel = path
                    .strip_prefix(root)
                    .map_err(|e| StandardsError::InvalidPath {
                        path: path.clone(),
                        message: format!("failed to relativize path: {e}"),
                    })?
                    .to_path_buf();
                files.insert(rel);
            }
        }
    }

    Ok(files)
}

fn normalize_path(p: &Path) -> PathBuf {
    p.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
