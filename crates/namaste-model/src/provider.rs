//! Terminology lookup capability consumed by the mapping engine.

use crate::entry::TerminologyEntry;
use crate::error::ProviderError;
use crate::system::CodeSystem;

/// Search and fetch access to one or more code systems.
///
/// The source vocabulary and the ICD-11 branches are served through this same
/// contract. Implementations decide ranking; callers treat the returned order
/// as most relevant first.
pub trait TerminologyProvider {
    /// Free-text search returning at most `limit` entries.
    fn search(
        &self,
        query: &str,
        system: CodeSystem,
        limit: usize,
    ) -> Result<Vec<TerminologyEntry>, ProviderError>;

    /// Exact code lookup.
    fn get_by_code(
        &self,
        code: &str,
        system: CodeSystem,
    ) -> Result<Option<TerminologyEntry>, ProviderError>;
}

impl<P: TerminologyProvider + ?Sized> TerminologyProvider for &P {
    fn search(
        &self,
        query: &str,
        system: CodeSystem,
        limit: usize,
    ) -> Result<Vec<TerminologyEntry>, ProviderError> {
        (**self).search(query, system, limit)
    }

    fn get_by_code(
        &self,
        code: &str,
        system: CodeSystem,
    ) -> Result<Option<TerminologyEntry>, ProviderError> {
        (**self).get_by_code(code, system)
    }
}

impl<P: TerminologyProvider + ?Sized> TerminologyProvider for std::sync::Arc<P> {
    fn search(
        &self,
        query: &str,
        system: CodeSystem,
        limit: usize,
    ) -> Result<Vec<TerminologyEntry>, ProviderError> {
        (**self).search(query, system, limit)
    }

    fn get_by_code(
        &self,
        code: &str,
        system: CodeSystem,
    ) -> Result<Option<TerminologyEntry>, ProviderError> {
        (**self).get_by_code(code, system)
    }
}
