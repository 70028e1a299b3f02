//! The `Encounter` aggregate.
//!
//! Tracks a single patient encounter through check-in, an active clinical
//! episode, completion, and an optional reopen. Commands are rejected when
//! they don't match the current status; invariant messages name the
//! command and the status that blocked it so callers (and the diagnosis
//! handler's cross-aggregate check) get an actionable reason.

use clinical_core::{Aggregate, AggregateId, DomainError, DomainEvent};
use serde_json::json;

use super::commands::EncounterCommand;
use super::state::{event_types, EncounterState, EncounterStatus};

#[derive(Debug, Default)]
pub struct EncounterAggregate;

impl Aggregate for EncounterAggregate {
    const NAME: &'static str = "Encounter";

    type State = EncounterState;
    type Command = EncounterCommand;

    fn apply_event(mut state: Self::State, event: &DomainEvent) -> Self::State {
        match event.event_type.as_str() {
            event_types::PATIENT_CHECKED_IN => {
                state.status = EncounterStatus::CheckedIn;
                state.patient_id = event
                    .payload
                    .get("patient_id")
                    .and_then(|v| v.as_str())
                    .and_then(|s| s.parse().ok());
            }
            event_types::ENCOUNTER_BEGAN => {
                state.status = EncounterStatus::Active;
            }
            event_types::ENCOUNTER_COMPLETED | event_types::PATIENT_DISCHARGED => {
                state.status = EncounterStatus::Completed;
            }
            event_types::ENCOUNTER_REOPENED => {
                state.status = EncounterStatus::Active;
            }
            _ => {}
        }
        state
    }

    fn execute(
        state: &Self::State,
        command: Self::Command,
    ) -> Result<Vec<DomainEvent>, DomainError> {
        match command {
            EncounterCommand::CheckInPatient(cmd) => {
                if state.status != EncounterStatus::None {
                    return Err(DomainError::invariant_violated(
                        "Encounter has already been checked in",
                    ));
                }
                let payload = json!({
                    "patient_id": cmd.patient_id,
                    "checked_in_at": cmd.checked_in_at,
                })
                .as_object()
                .cloned()
                .unwrap_or_default();
                Ok(vec![DomainEvent::pending(
                    event_types::PATIENT_CHECKED_IN,
                    AggregateId::from_uuid(cmd.encounter_id),
                    EncounterAggregate::NAME,
                    payload,
                    &cmd.ctx,
                )])
            }
            EncounterCommand::BeginEncounter(cmd) => {
                if state.status != EncounterStatus::CheckedIn {
                    return Err(DomainError::invariant_violated(format!(
                        "Cannot begin encounter {}: not checked in",
                        cmd.encounter_id
                    )));
                }
                let payload = json!({
                    "patient_id": state.patient_id,
                    "practitioner_id": cmd.practitioner_id,
                    "began_at": cmd.began_at,
                })
                .as_object()
                .cloned()
                .unwrap_or_default();
                Ok(vec![DomainEvent::pending(
                    event_types::ENCOUNTER_BEGAN,
                    AggregateId::from_uuid(cmd.encounter_id),
                    EncounterAggregate::NAME,
                    payload,
                    &cmd.ctx,
                )])
            }
            EncounterCommand::CompleteEncounter(cmd) => {
                if state.status != EncounterStatus::Active {
                    return Err(DomainError::invariant_violated(format!(
                        "Cannot complete encounter {}: not active",
                        cmd.encounter_id
                    )));
                }
                let payload = json!({ "completed_at": cmd.completed_at })
                    .as_object()
                    .cloned()
                    .unwrap_or_default();
                Ok(vec![DomainEvent::pending(
                    event_types::ENCOUNTER_COMPLETED,
                    AggregateId::from_uuid(cmd.encounter_id),
                    EncounterAggregate::NAME,
                    payload,
                    &cmd.ctx,
                )])
            }
            EncounterCommand::ReopenEncounter(cmd) => {
                if state.status != EncounterStatus::Completed {
                    return Err(DomainError::invariant_violated(format!(
                        "Cannot reopen encounter {}: not completed",
                        cmd.encounter_id
                    )));
                }
                Ok(vec![DomainEvent::pending(
                    event_types::ENCOUNTER_REOPENED,
                    AggregateId::from_uuid(cmd.encounter_id),
                    EncounterAggregate::NAME,
                    serde_json::Map::new(),
                    &cmd.ctx,
                )])
            }
            EncounterCommand::DischargePatient(cmd) => {
                if state.status != EncounterStatus::Active {
                    return Err(DomainError::invariant_violated(format!(
                        "Cannot discharge patient from encounter {}: not active",
                        cmd.encounter_id
                    )));
                }
                Ok(vec![DomainEvent::pending(
                    event_types::PATIENT_DISCHARGED,
                    AggregateId::from_uuid(cmd.encounter_id),
                    EncounterAggregate::NAME,
                    serde_json::Map::new(),
                    &cmd.ctx,
                )])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::encounter::commands::{
        BeginEncounter, CheckInPatient, CompleteEncounter, DischargePatient, ReopenEncounter,
    };
    use chrono::Utc;
    use clinical_core::ConnectionStatus;
    use uuid::Uuid;

    fn ctx() -> clinical_core::CommandContext {
        clinical_core::CommandContext {
            occurred_at: Utc::now(),
            performed_by: Uuid::new_v4(),
            performer_role: "nurse".to_string(),
            organization_id: Uuid::new_v4(),
            facility_id: Uuid::new_v4(),
            device_id: "dev".to_string(),
            connection_status: ConnectionStatus::Online,
            correlation_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn full_lifecycle_accepts_each_transition_in_order() {
        let encounter_id = Uuid::new_v4();
        let patient_id = Uuid::new_v4();
        let mut state = EncounterState::default();

        let checked_in = EncounterAggregate::execute(
            &state,
            EncounterCommand::CheckInPatient(CheckInPatient {
                encounter_id,
                patient_id,
                checked_in_at: Utc::now(),
                ctx: ctx(),
            }),
        )
        .expect("accepted");
        state = EncounterAggregate::apply_event(state, &checked_in[0]);
        assert_eq!(state.status, EncounterStatus::CheckedIn);

        let began = EncounterAggregate::execute(
            &state,
            EncounterCommand::BeginEncounter(BeginEncounter {
                encounter_id,
                practitioner_id: Uuid::new_v4(),
                began_at: Utc::now(),
                ctx: ctx(),
            }),
        )
        .expect("accepted");
        assert_eq!(
            began[0].payload.get("patient_id").and_then(|v| v.as_str()),
            Some(patient_id.to_string()).as_deref()
        );
        state = EncounterAggregate::apply_event(state, &began[0]);
        assert_eq!(state.status, EncounterStatus::Active);

        let completed = EncounterAggregate::execute(
            &state,
            EncounterCommand::CompleteEncounter(CompleteEncounter {
                encounter_id,
                completed_at: Utc::now(),
                ctx: ctx(),
            }),
        )
        .expect("accepted");
        state = EncounterAggregate::apply_event(state, &completed[0]);
        assert_eq!(state.status, EncounterStatus::Completed);

        let reopened = EncounterAggregate::execute(
            &state,
            EncounterCommand::ReopenEncounter(ReopenEncounter {
                encounter_id,
                ctx: ctx(),
            }),
        )
        .expect("accepted");
        state = EncounterAggregate::apply_event(state, &reopened[0]);
        assert_eq!(state.status, EncounterStatus::Active);
    }

    #[test]
    fn begin_encounter_rejected_before_check_in() {
        let state = EncounterState::default();
        let result = EncounterAggregate::execute(
            &state,
            EncounterCommand::BeginEncounter(BeginEncounter {
                encounter_id: Uuid::new_v4(),
                practitioner_id: Uuid::new_v4(),
                began_at: Utc::now(),
                ctx: ctx(),
            }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn discharge_requires_active_status() {
        let state = EncounterState {
            status: EncounterStatus::CheckedIn,
            patient_id: None,
        };
        let result = EncounterAggregate::execute(
            &state,
            EncounterCommand::DischargePatient(DischargePatient {
                encounter_id: Uuid::new_v4(),
                ctx: ctx(),
            }),
        );
        assert!(result.is_err());
    }
}
