#![deny(unsafe_code)]

pub mod doctor;
pub mod error;
pub mod hash;
pub mod hierarchy;
pub mod loaders;
pub mod manifest;
pub mod paths;
pub mod provider;
pub mod registry;

pub use crate::doctor::DoctorReport;
pub use crate::error::StandardsError;
pub use crate::hierarchy::{Hierarchy, ParentLink};
pub use crate::loaders::{
    load_default_registry, load_predefined_mappings, load_vocabulary,
};
pub use crate::paths::{TERMINOLOGY_ENV_VAR, terminology_root};
pub use crate::provider::{Icd11Terminology, SourceVocabulary, Vocabulary};
pub use crate::registry::{TerminologyRegistry, VerifySummary};
