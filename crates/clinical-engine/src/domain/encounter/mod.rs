//! `Encounter` aggregate: a patient's single clinical visit, from check-in
//! through an active episode to completion (and, if needed, reopening).

pub mod aggregate;
pub mod commands;
pub mod state;

pub use aggregate::EncounterAggregate;
pub use commands::{
    BeginEncounter, CheckInPatient, CompleteEncounter, DischargePatient, EncounterCommand,
    ReopenEncounter,
};
pub use state::{EncounterState, EncounterStatus};
