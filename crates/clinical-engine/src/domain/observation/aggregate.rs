//! The `Observation` aggregate.
//!
//! Vitals and symptoms have no lifecycle of their own in the event
//! catalog — they are recordable clinical facts keyed by the encounter
//! they were captured during. This aggregate carries no invariants beyond
//! accepting the command it's given; state is a running count, kept only
//! so rehydration has something non-trivial to fold.

use clinical_core::{Aggregate, AggregateId, DomainError, DomainEvent};
use serde_json::json;

use super::commands::ObservationCommand;

pub mod event_types {
    pub const VITAL_SIGNS_RECORDED: &str = "clinical.observation.VitalSignsRecorded";
    pub const SYMPTOM_REPORTED: &str = "clinical.observation.SymptomReported";
}

#[derive(Debug, Clone, Default)]
pub struct ObservationState {
    pub recorded_count: u32,
}

#[derive(Debug, Default)]
pub struct ObservationAggregate;

impl Aggregate for ObservationAggregate {
    const NAME: &'static str = "Observation";

    type State = ObservationState;
    type Command = ObservationCommand;

    fn apply_event(mut state: Self::State, event: &DomainEvent) -> Self::State {
        match event.event_type.as_str() {
            event_types::VITAL_SIGNS_RECORDED | event_types::SYMPTOM_REPORTED => {
                state.recorded_count += 1;
            }
            _ => {}
        }
        state
    }

    fn execute(
        _state: &Self::State,
        command: Self::Command,
    ) -> Result<Vec<DomainEvent>, DomainError> {
        match command {
            ObservationCommand::RecordVitalSigns(cmd) => {
                let payload = json!({
                    "patient_id": cmd.patient_id,
                    "encounter_id": cmd.encounter_id,
                    "readings": cmd.readings,
                })
                .as_object()
                .cloned()
                .unwrap_or_default();
                Ok(vec![DomainEvent::pending(
                    event_types::VITAL_SIGNS_RECORDED,
                    AggregateId::from_uuid(cmd.encounter_id),
                    ObservationAggregate::NAME,
                    payload,
                    &cmd.ctx,
                )])
            }
            ObservationCommand::ReportSymptom(cmd) => {
                let payload = json!({
                    "patient_id": cmd.patient_id,
                    "encounter_id": cmd.encounter_id,
                    "symptom": cmd.symptom,
                    "severity": cmd.severity,
                })
                .as_object()
                .cloned()
                .unwrap_or_default();
                Ok(vec![DomainEvent::pending(
                    event_types::SYMPTOM_REPORTED,
                    AggregateId::from_uuid(cmd.encounter_id),
                    ObservationAggregate::NAME,
                    payload,
                    &cmd.ctx,
                )])
            }
        }
    }
}
