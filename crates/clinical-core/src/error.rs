//! Domain-level error types with UUID tracking for distributed tracing.
//!
//! `DomainError` is raised by an aggregate's `execute` (or by a specialized
//! command handler's cross-aggregate precondition check) when a command is
//! rejected. `ConcurrencyError` is raised by an `EventStore::append` when the
//! caller's `aggregate_version` does not match the stream's expected next
//! version. `EnvelopeError` is raised by the command/query gateways when a
//! raw request is malformed.

use std::backtrace::Backtrace;
use std::fmt;

use uuid::Uuid;

use crate::error_code::ErrorCode;

/// Raised when an aggregate rejects a command due to an invariant violation.
#[derive(Debug)]
pub struct DomainError {
    id: Uuid,
    kind: DomainErrorKind,
    backtrace: Backtrace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainErrorKind {
    /// The aggregate's own invariant rejected the command (e.g. "already confirmed").
    InvariantViolated(String),
    /// A cross-aggregate precondition failed (e.g. INV-CJ-1: encounter not active).
    PreconditionFailed(String),
    /// The aggregate does not know how to handle this command at all.
    UnknownCommand(String),
}

impl DomainError {
    #[must_use]
    pub fn new(kind: DomainErrorKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            backtrace: Backtrace::capture(),
        }
    }

    #[must_use]
    pub fn error_id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> &DomainErrorKind {
        &self.kind
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::ValidationFailed
    }

    #[must_use]
    pub fn invariant_violated(reason: impl Into<String>) -> Self {
        Self::new(DomainErrorKind::InvariantViolated(reason.into()))
    }

    #[must_use]
    pub fn precondition_failed(reason: impl Into<String>) -> Self {
        Self::new(DomainErrorKind::PreconditionFailed(reason.into()))
    }

    #[must_use]
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::new(DomainErrorKind::UnknownCommand(command.into()))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DomainErrorKind::InvariantViolated(reason) => write!(f, "{reason}"),
            DomainErrorKind::PreconditionFailed(reason) => write!(f, "{reason}"),
            DomainErrorKind::UnknownCommand(command) => write!(f, "Unknown command: {command}"),
        }
    }
}

impl std::error::Error for DomainError {}

/// Raised when `aggregate_version` does not match the stream's expected next version (INV-XX-3).
#[derive(Debug)]
pub struct ConcurrencyError {
    id: Uuid,
    aggregate_id: Uuid,
    expected_version: u64,
    actual_version: u64,
    backtrace: Backtrace,
}

impl ConcurrencyError {
    #[must_use]
    pub fn new(aggregate_id: Uuid, expected_version: u64, actual_version: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            aggregate_id,
            expected_version,
            actual_version,
            backtrace: Backtrace::capture(),
        }
    }

    #[must_use]
    pub fn error_id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn aggregate_id(&self) -> Uuid {
        self.aggregate_id
    }

    #[must_use]
    pub fn expected_version(&self) -> u64 {
        self.expected_version
    }

    #[must_use]
    pub fn actual_version(&self) -> u64 {
        self.actual_version
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::Conflict
    }
}

impl fmt::Display for ConcurrencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Concurrency conflict on aggregate {}: expected version {}, got {}",
            self.aggregate_id, self.expected_version, self.actual_version
        )
    }
}

impl std::error::Error for ConcurrencyError {}

/// Raised by a gateway when a raw request is malformed (pipeline Stage 1).
#[derive(Debug)]
pub struct EnvelopeError {
    id: Uuid,
    kind: EnvelopeErrorKind,
    backtrace: Backtrace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeErrorKind {
    MissingField(String),
    UnknownType(String),
    InvalidUuid(String),
    InvalidShape(String),
}

impl EnvelopeError {
    #[must_use]
    pub fn new(kind: EnvelopeErrorKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            backtrace: Backtrace::capture(),
        }
    }

    #[must_use]
    pub fn error_id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> &EnvelopeErrorKind {
        &self.kind
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::ValidationFailed
    }

    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(EnvelopeErrorKind::MissingField(field.into()))
    }

    #[must_use]
    pub fn unknown_type(type_name: impl Into<String>) -> Self {
        Self::new(EnvelopeErrorKind::UnknownType(type_name.into()))
    }

    #[must_use]
    pub fn invalid_uuid(field: impl Into<String>) -> Self {
        Self::new(EnvelopeErrorKind::InvalidUuid(field.into()))
    }

    #[must_use]
    pub fn invalid_shape(reason: impl Into<String>) -> Self {
        Self::new(EnvelopeErrorKind::InvalidShape(reason.into()))
    }
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EnvelopeErrorKind::MissingField(field) => {
                write!(f, "Missing required field: {field}")
            }
            EnvelopeErrorKind::UnknownType(type_name) => {
                write!(f, "Unknown type: {type_name}")
            }
            EnvelopeErrorKind::InvalidUuid(field) => {
                write!(f, "Invalid UUID for field: {field}")
            }
            EnvelopeErrorKind::InvalidShape(reason) => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for EnvelopeError {}
