use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, info_span};

use namaste_cli::bundle::check_bundle;
use namaste_cli::config::load_options;
use namaste_cli::fhir::{
    BundleResource, CodeSystemResource, ConceptMapResource, Parameters, ValueSetResource,
};
use namaste_cli::lookup::search_entries;
use namaste_map::{MappingOptions, TranslateRequest};
use namaste_model::{CodeSystem, MappingError, TargetSystem};
use namaste_standards::{
    DoctorReport, TerminologyRegistry, VerifySummary, load_default_registry,
};

use crate::cli::{
    BundleCheckArgs, CodesArgs, ConceptMapArgs, DoctorArgs, HierarchyArgs, OutputFormatArg,
    SearchArgs, TranslateArgs, ValidateArgs,
};
use crate::summary::{
    print_bundle_check, print_candidates, print_concept_map_summary, print_doctor, print_entries,
    print_hierarchy, print_validation,
};

/// Verified terminology plus the engine options for one invocation.
pub struct Session {
    pub registry: TerminologyRegistry,
    pub summary: VerifySummary,
    pub options: MappingOptions,
}

impl Session {
    pub fn open(terminology_dir: Option<&Path>, config: Option<&Path>) -> Result<Self> {
        let options = load_options(config)?;
        let (registry, summary) = match terminology_dir {
            Some(dir) => TerminologyRegistry::verify_and_load(dir)
                .with_context(|| format!("load terminology from {}", dir.display()))?,
            None => load_default_registry().context("load terminology")?,
        };
        Ok(Self {
            registry,
            summary,
            options,
        })
    }
}

pub fn run_translate(session: &Session, args: &TranslateArgs) -> Result<()> {
    let request = TranslateRequest::parse(&args.code, &args.system, args.target.as_deref())?;
    let span = info_span!("translate", code = %request.code, system = %request.system);
    let _guard = span.enter();

    let resolver = session.registry.resolver(session.options);
    let results = resolver
        .translate(&request)
        .with_context(|| format!("translate {}#{}", request.system, request.code))?;
    debug!(results = results.len(), "translation finished");

    match args.format {
        OutputFormatArg::Json => print_json(&Parameters::translation(&request, &results)),
        OutputFormatArg::Table => {
            if results.is_empty() {
                println!(
                    "No translation found for {}#{}",
                    request.system, request.code
                );
            } else {
                print_candidates(&results);
            }
            Ok(())
        }
    }
}

pub fn run_validate(session: &Session, args: &ValidateArgs) -> Result<()> {
    let system: TargetSystem = args.target_system.parse()?;
    let resolver = session.registry.resolver(session.options);
    let validation = resolver
        .validate_mapping(args.source.trim(), args.target.trim(), system)
        .with_context(|| format!("validate {} -> {system}#{}", args.source, args.target))?;
    match args.format {
        OutputFormatArg::Json => print_json(&validation),
        OutputFormatArg::Table => {
            print_validation(&validation);
            Ok(())
        }
    }
}

pub fn run_search(session: &Session, args: &SearchArgs) -> Result<()> {
    let system: CodeSystem = args.system.parse()?;
    let entries = search_entries(
        &session.registry,
        system,
        &args.query,
        args.tradition.as_deref(),
        args.count,
    );
    debug!(system = %system, hits = entries.len(), "search finished");
    match args.format {
        OutputFormatArg::Json if args.bundle => print_json(&BundleResource::searchset(
            system,
            &args.query,
            &entries,
            Utc::now(),
        )),
        OutputFormatArg::Json => print_json(&ValueSetResource::expansion(
            system,
            &args.query,
            &entries,
            Utc::now(),
        )),
        OutputFormatArg::Table => {
            print_entries(&entries);
            println!("{} of {} matched", entries.len(), system.title());
            Ok(())
        }
    }
}

pub fn run_codes(session: &Session, args: &CodesArgs) -> Result<()> {
    let system: CodeSystem = args.system.parse()?;
    let entries = session.registry.vocabulary(system).entries();
    match args.format {
        OutputFormatArg::Json => print_json(&CodeSystemResource::new(system, entries)),
        OutputFormatArg::Table => {
            print_entries(entries);
            Ok(())
        }
    }
}

pub fn run_concept_map(session: &Session, args: &ConceptMapArgs) -> Result<()> {
    let resolver = session.registry.resolver(session.options);
    let groups = resolver
        .assemble(session.registry.namaste.entries())
        .context("assemble concept map")?;

    if args.format == OutputFormatArg::Table {
        print_concept_map_summary(&groups);
    }
    let resource = ConceptMapResource::new(groups, Utc::now()).context("serialize concept map")?;
    match &args.output {
        Some(path) => {
            write_json(path, &resource)?;
            info!(path = %path.display(), id = %resource.id, "wrote concept map");
            println!("ConceptMap {} written to {}", resource.id, path.display());
            Ok(())
        }
        None if args.format == OutputFormatArg::Json => print_json(&resource),
        None => Ok(()),
    }
}

pub fn run_hierarchy(session: &Session, args: &HierarchyArgs) -> Result<()> {
    let system: TargetSystem = args.system.parse()?;
    let code = args.code.trim();
    let hierarchy = session
        .registry
        .vocabulary(system.into())
        .hierarchy(code)
        .ok_or_else(|| MappingError::not_found(system.into(), code))?;
    debug!(
        code,
        parents = hierarchy.parents.len(),
        children = hierarchy.children.len(),
        "hierarchy resolved"
    );
    match args.format {
        OutputFormatArg::Json => print_json(&hierarchy),
        OutputFormatArg::Table => {
            print_hierarchy(&hierarchy);
            Ok(())
        }
    }
}

pub fn run_bundle_check(args: &BundleCheckArgs) -> Result<()> {
    let path = &args.file;
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    let bundle: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("parse {}", path.display()))?;
    let check = check_bundle(bundle, Utc::now())
        .with_context(|| format!("check {}", path.display()))?;
    info!(
        conditions = check.conditions.len(),
        compliant = check.is_compliant(),
        "bundle checked"
    );
    match args.format {
        OutputFormatArg::Json => print_json(&check.response),
        OutputFormatArg::Table => {
            print_bundle_check(&check);
            Ok(())
        }
    }
}

pub fn run_doctor(session: &Session, args: &DoctorArgs) -> Result<()> {
    let report = DoctorReport::from_verify_summary(&session.summary, session.registry.files.clone());
    match args.format {
        OutputFormatArg::Json => print_json(&report),
        OutputFormatArg::Table => {
            println!("Terminology: {}", session.summary.terminology_dir.display());
            print_doctor(&report);
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{json}");
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value).context("serialize output")?;
    json.push('\n');
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))
}
