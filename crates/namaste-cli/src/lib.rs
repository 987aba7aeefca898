//! CLI library components for the NAMASTE terminology tool.

pub mod bundle;
pub mod config;
pub mod fhir;
pub mod logging;
pub mod lookup;

use namaste_model::MappingError;

/// Process exit code for a failed command.
///
/// Request problems (unknown code or system, malformed request) exit with 2;
/// everything else, including provider and I/O failures, exits with 1.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    let client_error = error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<MappingError>())
        .any(MappingError::is_client_error);
    if client_error { 2 } else { 1 }
}
