//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only configuration-shaped values can fail here; policy synthesis and role
/// decisions are total functions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A role name was empty or contained whitespace.
    #[error("invalid role: {0}")]
    InvalidRole(String),

    /// A trusted email domain could not be used as a suffix.
    #[error("invalid trusted domain: {0}")]
    InvalidTrustedDomain(String),
}

impl DomainError {
    pub fn invalid_role(msg: impl Into<String>) -> Self {
        Self::InvalidRole(msg.into())
    }

    pub fn invalid_trusted_domain(msg: impl Into<String>) -> Self {
        Self::InvalidTrustedDomain(msg.into())
    }
}
