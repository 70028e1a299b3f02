//! `Diagnosis` aggregate: a single confirmed clinical judgment and the
//! treatments prescribed against it.

pub mod aggregate;
pub mod commands;
pub mod state;

pub use aggregate::DiagnosisAggregate;
pub use commands::{ConfirmDiagnosis, DiagnosisCommand, StartTreatment, StopTreatment};
pub use state::{DiagnosisState, DiagnosisStatus};
