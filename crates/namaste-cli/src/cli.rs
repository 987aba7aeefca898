//! CLI argument definitions for the NAMASTE terminology tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "namaste",
    version,
    about = "NAMASTE to ICD-11 terminology mapping",
    long_about = "Translate NAMASTE codes to ICD-11 TM2 and Biomedicine codes and back.\n\n\
                  Curated mappings take precedence; other codes are matched by text \
                  similarity. Results render as tables or FHIR-shaped JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Terminology directory containing manifest.toml (default: bundled data).
    #[arg(long = "terminology-dir", value_name = "DIR", global = true)]
    pub terminology_dir: Option<PathBuf>,

    /// TOML file overriding mapping thresholds and limits.
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Translate a code between NAMASTE and ICD-11.
    Translate(TranslateArgs),

    /// Check a proposed NAMASTE to ICD-11 mapping.
    Validate(ValidateArgs),

    /// Search one code system by text.
    Search(SearchArgs),

    /// List every concept of a code system.
    Codes(CodesArgs),

    /// Export the NAMASTE to ICD-11 ConceptMap.
    ConceptMap(ConceptMapArgs),

    /// Show the parents and children of an ICD-11 code.
    Hierarchy(HierarchyArgs),

    /// Check that every Condition in a FHIR Bundle is NAMASTE and ICD-11 coded.
    BundleCheck(BundleCheckArgs),

    /// Verify terminology checksums and print counts.
    Doctor(DoctorArgs),
}

#[derive(Parser)]
pub struct TranslateArgs {
    /// Code to translate.
    #[arg(value_name = "CODE")]
    pub code: String,

    /// Code system of CODE (namaste, tm2, biomedicine, or a system URI).
    #[arg(long = "system", default_value = "namaste")]
    pub system: String,

    /// Target system (tm2, biomedicine or both for NAMASTE codes; namaste for ICD-11 codes).
    #[arg(long = "target")]
    pub target: Option<String>,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// NAMASTE source code.
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// ICD-11 target code.
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// ICD-11 branch of TARGET.
    #[arg(long = "target-system", default_value = "tm2")]
    pub target_system: String,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Text matched against code, display and definition.
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Code system to search.
    #[arg(long = "system", default_value = "namaste")]
    pub system: String,

    /// Maximum number of results.
    #[arg(long = "count", default_value_t = 50)]
    pub count: usize,

    /// Only NAMASTE concepts of this AYUSH system (Ayurveda, Siddha, Unani).
    #[arg(long = "tradition")]
    pub tradition: Option<String>,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Render JSON output as a searchset Bundle instead of a ValueSet expansion.
    #[arg(long = "bundle")]
    pub bundle: bool,
}

#[derive(Parser)]
pub struct CodesArgs {
    /// Code system to list.
    #[arg(long = "system", default_value = "namaste")]
    pub system: String,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct ConceptMapArgs {
    /// Write the ConceptMap to a file instead of stdout.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// JSON writes the FHIR resource; table prints per-group totals.
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct HierarchyArgs {
    /// ICD-11 code to look up.
    #[arg(value_name = "CODE")]
    pub code: String,

    /// ICD-11 branch of CODE.
    #[arg(long = "system", default_value = "tm2")]
    pub system: String,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct BundleCheckArgs {
    /// FHIR Bundle JSON file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// JSON prints the transaction-response Bundle; table prints per-Condition coverage.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct DoctorArgs {
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
