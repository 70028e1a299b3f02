//! Shared error-code vocabulary.
//!
//! Every crate-local error type in this workspace maps to one of these
//! codes via an `error_code()` method, so a future transport adapter can
//! translate domain failures into status codes without the domain layer
//! knowing anything about transports.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationFailed,
    InvalidInput,
    NotFound,
    Conflict,
    Unauthorized,
    Forbidden,
    InternalError,
    DatabaseError,
    ServiceUnavailable,
}

impl ErrorCode {
    /// HTTP-compatible status code for this error kind, for adapters that need one.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::ValidationFailed | Self::InvalidInput => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::InternalError | Self::DatabaseError => 500,
            Self::ServiceUnavailable => 503,
        }
    }
}
