//! Read-model projections folded from recorded events.

pub mod patient_summary;

pub use patient_summary::{PatientSummaryProjection, PatientSummaryState};
