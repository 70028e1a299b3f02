//! `Observation` aggregate: vitals and symptoms recorded during an
//! encounter (added by this expansion — the event catalog gives these
//! facts `encounter_id` as their natural stream key rather than an
//! aggregate of their own).

pub mod aggregate;
pub mod commands;

pub use aggregate::{event_types, ObservationAggregate, ObservationState};
pub use commands::{ObservationCommand, RecordVitalSigns, ReportSymptom};
