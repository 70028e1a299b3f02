//! Specialized command handler for `Diagnosis` commands.
//!
//! Extends the generic flow (see [`crate::application::command_handler`])
//! with a cross-aggregate precondition: the referenced encounter must be
//! active (INV-CJ-1). Encounter state is derived by replaying the
//! encounter's stream, so this check is eventually consistent — under
//! offline operation the encounter stream on this node may be stale.

use clinical_core::{AggregateId, Dispatcher, DomainEvent, EventStore};
use uuid::Uuid;

use crate::application::error::AggregateError;
use crate::domain::diagnosis::{DiagnosisAggregate, DiagnosisCommand};
use clinical_core::Aggregate;

const ENCOUNTER_BEGAN: &str = crate::domain::encounter::state::event_types::ENCOUNTER_BEGAN;
const ENCOUNTER_REOPENED: &str = crate::domain::encounter::state::event_types::ENCOUNTER_REOPENED;
const ENCOUNTER_COMPLETED: &str = crate::domain::encounter::state::event_types::ENCOUNTER_COMPLETED;
const PATIENT_DISCHARGED: &str = crate::domain::encounter::state::event_types::PATIENT_DISCHARGED;
const PATIENT_CHECKED_IN: &str = crate::domain::encounter::state::event_types::PATIENT_CHECKED_IN;

enum EncounterCheckStatus {
    None,
    CheckedIn,
    Active,
    Completed,
}

impl EncounterCheckStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::CheckedIn => "checked_in",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// Handles `Diagnosis` commands against a store, enforcing INV-CJ-1 before
/// delegating to the generic rehydrate/execute/append flow.
pub struct DiagnosisCommandHandler<'a, S: EventStore> {
    store: &'a S,
    dispatcher: &'a Dispatcher,
}

impl<'a, S: EventStore> DiagnosisCommandHandler<'a, S> {
    #[must_use]
    pub fn new(store: &'a S, dispatcher: &'a Dispatcher) -> Self {
        Self { store, dispatcher }
    }

    pub fn handle(
        &self,
        aggregate_id: AggregateId,
        command: DiagnosisCommand,
    ) -> Result<Vec<DomainEvent>, AggregateError> {
        if let DiagnosisCommand::ConfirmDiagnosis(cmd) = &command {
            self.check_encounter_active(cmd.encounter_id)?;
        }

        let history = self.store.read_stream(aggregate_id);
        let mut next_version = history.len() as u64;
        let state = DiagnosisAggregate::rehydrate(history.iter());

        let new_events = DiagnosisAggregate::execute(&state, command)?;

        let mut persisted = Vec::with_capacity(new_events.len());
        for event in new_events {
            next_version += 1;
            let versioned = event.with_aggregate_version(next_version);
            persisted.push(self.store.append(versioned)?);
        }
        for event in &persisted {
            self.dispatcher.dispatch(event);
        }
        Ok(persisted)
    }

    /// INV-CJ-1: the diagnosis's encounter must be active.
    fn check_encounter_active(&self, encounter_id: Uuid) -> Result<(), AggregateError> {
        let stream = self.store.read_stream(AggregateId::from_uuid(encounter_id));
        let mut status = EncounterCheckStatus::None;
        for event in &stream {
            match event.event_type.as_str() {
                t if t == ENCOUNTER_BEGAN || t == ENCOUNTER_REOPENED => {
                    status = EncounterCheckStatus::Active;
                }
                t if t == ENCOUNTER_COMPLETED || t == PATIENT_DISCHARGED => {
                    status = EncounterCheckStatus::Completed;
                }
                t if t == PATIENT_CHECKED_IN => {
                    status = EncounterCheckStatus::CheckedIn;
                }
                _ => {}
            }
        }

        if matches!(status, EncounterCheckStatus::Active) {
            Ok(())
        } else {
            Err(AggregateError::Precondition(format!(
                "Encounter {encounter_id} is not active (status: {}). \
                 the encounter must be active to confirm a diagnosis.",
                status.label()
            )))
        }
    }
}
