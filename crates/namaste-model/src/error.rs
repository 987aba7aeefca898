use thiserror::Error;

use crate::system::CodeSystem;

/// Failure reported by a terminology provider.
///
/// Providers own their retry and timeout policy; the engine propagates these
/// unchanged so callers can tell "no mapping" apart from "lookup failed".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("terminology provider unavailable: {0}")]
    Unavailable(String),
    #[error("malformed terminology provider response: {0}")]
    Malformed(String),
    #[error("provider does not serve code system {0}")]
    UnsupportedSystem(CodeSystem),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("{system} code not found: {code}")]
    NotFound { system: CodeSystem, code: String },
    #[error("unsupported code system: {0}")]
    UnsupportedSystem(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl MappingError {
    pub fn not_found(system: CodeSystem, code: impl Into<String>) -> Self {
        Self::NotFound {
            system,
            code: code.into(),
        }
    }

    pub fn self_translation(system: CodeSystem) -> Self {
        Self::InvalidRequest(format!("cannot translate {system} to itself"))
    }

    /// True for errors caused by the request itself.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Provider(_))
    }

    /// True when repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Provider(ProviderError::Unavailable(_) | ProviderError::Malformed(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, MappingError>;
