//! Commands accepted by the `Encounter` aggregate.

use chrono::{DateTime, Utc};
use clinical_core::CommandContext;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CheckInPatient {
    pub encounter_id: Uuid,
    pub patient_id: Uuid,
    pub checked_in_at: DateTime<Utc>,
    pub ctx: CommandContext,
}

#[derive(Debug, Clone)]
pub struct BeginEncounter {
    pub encounter_id: Uuid,
    pub practitioner_id: Uuid,
    pub began_at: DateTime<Utc>,
    pub ctx: CommandContext,
}

#[derive(Debug, Clone)]
pub struct CompleteEncounter {
    pub encounter_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub ctx: CommandContext,
}

#[derive(Debug, Clone)]
pub struct ReopenEncounter {
    pub encounter_id: Uuid,
    pub ctx: CommandContext,
}

#[derive(Debug, Clone)]
pub struct DischargePatient {
    pub encounter_id: Uuid,
    pub ctx: CommandContext,
}

#[derive(Debug, Clone)]
pub enum EncounterCommand {
    CheckInPatient(CheckInPatient),
    BeginEncounter(BeginEncounter),
    CompleteEncounter(CompleteEncounter),
    ReopenEncounter(ReopenEncounter),
    DischargePatient(DischargePatient),
}

impl EncounterCommand {
    #[must_use]
    pub fn encounter_id(&self) -> Uuid {
        match self {
            Self::CheckInPatient(c) => c.encounter_id,
            Self::BeginEncounter(c) => c.encounter_id,
            Self::CompleteEncounter(c) => c.encounter_id,
            Self::ReopenEncounter(c) => c.encounter_id,
            Self::DischargePatient(c) => c.encounter_id,
        }
    }
}
