//! `Encounter` state machine: `none -> checked_in -> active -> completed`,
//! with an optional `completed -> active` reopen transition.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EncounterStatus {
    #[default]
    None,
    CheckedIn,
    Active,
    Completed,
}

#[derive(Debug, Clone, Default)]
pub struct EncounterState {
    pub status: EncounterStatus,
    /// Carried forward from `PatientCheckedIn` so later events in the same
    /// stream (e.g. `EncounterBegan`) can include it in their payload
    /// without the caller having to repeat it on every command.
    pub patient_id: Option<uuid::Uuid>,
}

pub mod event_types {
    pub const PATIENT_CHECKED_IN: &str = "clinical.encounter.PatientCheckedIn";
    pub const ENCOUNTER_BEGAN: &str = "clinical.encounter.EncounterBegan";
    pub const ENCOUNTER_COMPLETED: &str = "clinical.encounter.EncounterCompleted";
    pub const ENCOUNTER_REOPENED: &str = "clinical.encounter.EncounterReopened";
    pub const PATIENT_DISCHARGED: &str = "clinical.encounter.PatientDischarged";
}
