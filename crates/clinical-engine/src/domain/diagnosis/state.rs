//! `Diagnosis` state: `unconfirmed -> confirmed` (terminal for this engine;
//! revised/resolved are a future iteration), plus the treatments this
//! diagnosis currently has in flight.

use std::collections::HashSet;

use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DiagnosisStatus {
    #[default]
    Unconfirmed,
    Confirmed,
}

#[derive(Debug, Clone, Default)]
pub struct DiagnosisState {
    pub status: DiagnosisStatus,
    pub condition: Option<String>,
    pub icd_code: Option<String>,
    pub patient_id: Option<Uuid>,
    pub encounter_id: Option<Uuid>,
    pub active_treatments: HashSet<Uuid>,
}

pub mod event_types {
    pub const DIAGNOSIS_CONFIRMED: &str = "clinical.judgment.DiagnosisConfirmed";
    pub const TREATMENT_STARTED: &str = "clinical.judgment.TreatmentStarted";
    pub const TREATMENT_STOPPED: &str = "clinical.judgment.TreatmentStopped";
}
