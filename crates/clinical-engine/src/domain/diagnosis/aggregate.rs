//! The `Diagnosis` aggregate.
//!
//! `ConfirmDiagnosis` flow:
//! 1. `DiagnosisCommandHandler` checks the referenced encounter is active
//!    (INV-CJ-1, cross-aggregate — see `application::diagnosis_handler`).
//! 2. This aggregate checks its own invariant (not already confirmed).
//! 3. `DiagnosisConfirmed` is emitted.
//!
//! Treatments are modeled as events on the diagnosis stream they belong to
//! (the event catalog gives them no aggregate of their own): `StartTreatment`
//! requires the diagnosis to already be confirmed; `StopTreatment` carries
//! no aggregate-level precondition, matching the `PatientSummary` projection
//! treating a stop-of-an-inactive-treatment as a recordable fact rather than
//! a rejected command.

use clinical_core::{Aggregate, AggregateId, DomainError, DomainEvent};
use serde_json::json;

use super::commands::DiagnosisCommand;
use super::state::{event_types, DiagnosisState, DiagnosisStatus};

#[derive(Debug, Default)]
pub struct DiagnosisAggregate;

impl Aggregate for DiagnosisAggregate {
    const NAME: &'static str = "Diagnosis";

    type State = DiagnosisState;
    type Command = DiagnosisCommand;

    fn apply_event(mut state: Self::State, event: &DomainEvent) -> Self::State {
        match event.event_type.as_str() {
            event_types::DIAGNOSIS_CONFIRMED => {
                state.status = DiagnosisStatus::Confirmed;
                state.condition = event
                    .payload
                    .get("condition")
                    .and_then(|v| v.as_str())
                    .map(str::to_string);
                state.icd_code = event
                    .payload
                    .get("icd_code")
                    .and_then(|v| v.as_str())
                    .map(str::to_string);
                state.patient_id = event
                    .payload
                    .get("patient_id")
                    .and_then(|v| v.as_str())
                    .and_then(|s| s.parse().ok());
                state.encounter_id = event
                    .payload
                    .get("encounter_id")
                    .and_then(|v| v.as_str())
                    .and_then(|s| s.parse().ok());
            }
            event_types::TREATMENT_STARTED => {
                if let Some(id) = event
                    .payload
                    .get("treatment_id")
                    .and_then(|v| v.as_str())
                    .and_then(|s| s.parse().ok())
                {
                    state.active_treatments.insert(id);
                }
            }
            event_types::TREATMENT_STOPPED => {
                if let Some(id) = event
                    .payload
                    .get("treatment_id")
                    .and_then(|v| v.as_str())
                    .and_then(|s| s.parse().ok())
                {
                    state.active_treatments.remove(&id);
                }
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
            DiagnosisCommand::ConfirmDiagnosis(cmd) => {
                if state.status != DiagnosisStatus::Unconfirmed {
                    return Err(DomainError::invariant_violated(
                        "Diagnosis already confirmed",
                    ));
                }
                let payload = json!({
                    "diagnosis_id": cmd.diagnosis_id,
                    "encounter_id": cmd.encounter_id,
                    "patient_id": cmd.patient_id,
                    "condition": cmd.condition,
                    "icd_code": cmd.icd_code,
                })
                .as_object()
                .cloned()
                .unwrap_or_default();
                Ok(vec![DomainEvent::pending(
                    event_types::DIAGNOSIS_CONFIRMED,
                    AggregateId::from_uuid(cmd.diagnosis_id),
                    DiagnosisAggregate::NAME,
                    payload,
                    &cmd.ctx,
                )])
            }
            DiagnosisCommand::StartTreatment(cmd) => {
                if state.status != DiagnosisStatus::Confirmed {
                    return Err(DomainError::invariant_violated(format!(
                        "Cannot start treatment for diagnosis {}: not confirmed",
                        cmd.diagnosis_id
                    )));
                }
                let payload = json!({
                    "treatment_id": cmd.treatment_id,
                    "diagnosis_id": cmd.diagnosis_id,
                    "patient_id": cmd.patient_id,
                    "treatment": cmd.treatment,
                })
                .as_object()
                .cloned()
                .unwrap_or_default();
                Ok(vec![DomainEvent::pending(
                    event_types::TREATMENT_STARTED,
                    AggregateId::from_uuid(cmd.diagnosis_id),
                    DiagnosisAggregate::NAME,
                    payload,
                    &cmd.ctx,
                )])
            }
            DiagnosisCommand::StopTreatment(cmd) => {
                let payload = json!({
                    "treatment_id": cmd.treatment_id,
                    "patient_id": cmd.patient_id,
                    "reason": cmd.reason,
                })
                .as_object()
                .cloned()
                .unwrap_or_default();
                Ok(vec![DomainEvent::pending(
                    event_types::TREATMENT_STOPPED,
                    AggregateId::from_uuid(cmd.diagnosis_id),
                    DiagnosisAggregate::NAME,
                    payload,
                    &cmd.ctx,
                )])
            }
        }
    }
}
