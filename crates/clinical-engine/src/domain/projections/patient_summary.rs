//! `PatientSummary` projection.
//!
//! A derived view tracking active conditions, active and stopped
//! treatments, and recorded vitals, rebuilt entirely from events.

use std::collections::HashMap;

use clinical_core::projection::ProjectionCore;
use clinical_core::{DomainEvent, Projection};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::diagnosis::state::event_types as diagnosis_events;
use crate::domain::observation::event_types as observation_events;

const SUBSCRIBED: &[&str] = &[
    diagnosis_events::DIAGNOSIS_CONFIRMED,
    diagnosis_events::TREATMENT_STARTED,
    diagnosis_events::TREATMENT_STOPPED,
    observation_events::VITAL_SIGNS_RECORDED,
];

#[derive(Debug, Clone, Default, Serialize)]
pub struct ActiveCondition {
    pub condition: String,
    pub icd_code: String,
    pub patient_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ActiveTreatment {
    pub treatment: String,
    pub diagnosis_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StoppedTreatment {
    pub treatment: Option<String>,
    pub diagnosis_id: Option<Uuid>,
    pub reason: Option<String>,
    pub patient_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VitalSignEntry {
    pub recorded_at: String,
    pub readings: serde_json::Map<String, serde_json::Value>,
    pub patient_id: Option<Uuid>,
    pub encounter_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PatientSummaryState {
    pub active_conditions: HashMap<Uuid, ActiveCondition>,
    pub active_treatments: HashMap<Uuid, ActiveTreatment>,
    pub stopped_treatments: HashMap<Uuid, StoppedTreatment>,
    pub vitals: Vec<VitalSignEntry>,
}

#[derive(Debug, Default)]
pub struct PatientSummaryProjection {
    core: ProjectionCore<PatientSummaryState>,
}

fn payload_uuid(event: &DomainEvent, field: &str) -> Option<Uuid> {
    event
        .payload
        .get(field)
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse().ok())
}

fn payload_str(event: &DomainEvent, field: &str) -> Option<String> {
    event
        .payload
        .get(field)
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

impl Projection for PatientSummaryProjection {
    type State = PatientSummaryState;

    fn subscribed_event_types(&self) -> &[&'static str] {
        SUBSCRIBED
    }

    fn apply(&self, mut state: Self::State, event: &DomainEvent) -> Self::State {
        match event.event_type.as_str() {
            t if t == diagnosis_events::DIAGNOSIS_CONFIRMED => {
                if let Some(diagnosis_id) = payload_uuid(event, "diagnosis_id") {
                    state.active_conditions.insert(
                        diagnosis_id,
                        ActiveCondition {
                            condition: payload_str(event, "condition").unwrap_or_default(),
                            icd_code: payload_str(event, "icd_code").unwrap_or_default(),
                            patient_id: payload_uuid(event, "patient_id"),
                        },
                    );
                }
            }
            t if t == diagnosis_events::TREATMENT_STARTED => {
                if let Some(treatment_id) = payload_uuid(event, "treatment_id") {
                    state.active_treatments.insert(
                        treatment_id,
                        ActiveTreatment {
                            treatment: payload_str(event, "treatment").unwrap_or_default(),
                            diagnosis_id: payload_uuid(event, "diagnosis_id"),
                            patient_id: payload_uuid(event, "patient_id"),
                        },
                    );
                }
            }
            t if t == diagnosis_events::TREATMENT_STOPPED => {
                if let Some(treatment_id) = payload_uuid(event, "treatment_id") {
                    let mut entry = StoppedTreatment {
                        reason: payload_str(event, "reason"),
                        patient_id: payload_uuid(event, "patient_id"),
                        ..Default::default()
                    };
                    if let Some(active) = state.active_treatments.remove(&treatment_id) {
                        entry.treatment = Some(active.treatment);
                        entry.diagnosis_id = active.diagnosis_id;
                        entry.patient_id = active.patient_id;
                    }
                    state.stopped_treatments.insert(treatment_id, entry);
                }
            }
            t if t == observation_events::VITAL_SIGNS_RECORDED => {
                let readings = event
                    .payload
                    .get("readings")
                    .and_then(|v| v.as_object())
                    .cloned()
                    .unwrap_or_default();
                state.vitals.push(VitalSignEntry {
                    recorded_at: event.occurred_at.to_rfc3339(),
                    readings,
                    patient_id: payload_uuid(event, "patient_id"),
                    encounter_id: payload_uuid(event, "encounter_id"),
                });
            }
            _ => {}
        }
        state
    }

    fn state(&self) -> &Self::State {
        &self.core.state
    }

    fn handle(&mut self, event: &DomainEvent) {
        if !SUBSCRIBED.contains(&event.event_type.as_str()) {
            return;
        }
        if !self.core.mark_processed(event.event_id) {
            return;
        }
        self.core.state = self.apply(std::mem::take(&mut self.core.state), event);
    }

    fn rebuild_from<'a>(&mut self, events: impl IntoIterator<Item = &'a DomainEvent>) {
        self.core.reset();
        for event in events {
            self.handle(event);
        }
    }
}
