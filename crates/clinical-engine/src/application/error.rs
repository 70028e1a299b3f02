//! Application layer error type for command handling.
//!
//! The application layer sits between domain and infrastructure, combining
//! the two failure sources a command can hit into a single return type.
//!
//! # Naming clarification
//!
//! The "Aggregate" in [`AggregateError`] refers to error aggregation
//! (combining multiple failure sources into one type), not a domain
//! aggregate.

use std::fmt;

use clinical_core::{ConcurrencyError, DomainError, EnvelopeError, ErrorCode};

/// Every way handling a command can fail, after the envelope itself has
/// been validated by the gateway.
#[derive(Debug)]
pub enum AggregateError {
    /// A domain invariant or precondition rejected the command.
    Domain(DomainError),
    /// The event store detected a version conflict at append time.
    Concurrency(ConcurrencyError),
    /// The command referenced an aggregate that does not satisfy a
    /// cross-aggregate precondition (e.g. confirming a diagnosis against
    /// an encounter that is not active).
    Precondition(String),
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Concurrency(e) => write!(f, "{e}"),
            Self::Precondition(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AggregateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Concurrency(e) => Some(e),
            Self::Precondition(_) => None,
        }
    }
}

impl From<DomainError> for AggregateError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

impl From<ConcurrencyError> for AggregateError {
    fn from(e: ConcurrencyError) -> Self {
        Self::Concurrency(e)
    }
}

impl From<EnvelopeError> for AggregateError {
    fn from(e: EnvelopeError) -> Self {
        Self::Precondition(e.to_string())
    }
}

impl From<crate::application::command_handler::CommandHandlerError> for AggregateError {
    fn from(e: crate::application::command_handler::CommandHandlerError) -> Self {
        match e {
            crate::application::command_handler::CommandHandlerError::Domain(err) => Self::Domain(err),
            crate::application::command_handler::CommandHandlerError::Concurrency(err) => {
                Self::Concurrency(err)
            }
        }
    }
}

impl AggregateError {
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Domain(e) => e.error_code(),
            Self::Concurrency(e) => e.error_code(),
            Self::Precondition(_) => ErrorCode::ValidationFailed,
        }
    }
}
