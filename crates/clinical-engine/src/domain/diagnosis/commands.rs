//! Commands accepted by the `Diagnosis` aggregate.

use clinical_core::CommandContext;
use uuid::Uuid;

/// Intent to confirm a diagnosis for a patient during an encounter.
#[derive(Debug, Clone)]
pub struct ConfirmDiagnosis {
    pub diagnosis_id: Uuid,
    pub encounter_id: Uuid,
    pub patient_id: Uuid,
    pub condition: String,
    pub icd_code: String,
    pub ctx: CommandContext,
}

#[derive(Debug, Clone)]
pub struct StartTreatment {
    pub diagnosis_id: Uuid,
    pub treatment_id: Uuid,
    pub patient_id: Uuid,
    pub treatment: String,
    pub ctx: CommandContext,
}

#[derive(Debug, Clone)]
pub struct StopTreatment {
    pub diagnosis_id: Uuid,
    pub treatment_id: Uuid,
    pub patient_id: Uuid,
    pub reason: String,
    pub ctx: CommandContext,
}

#[derive(Debug, Clone)]
pub enum DiagnosisCommand {
    ConfirmDiagnosis(ConfirmDiagnosis),
    StartTreatment(StartTreatment),
    StopTreatment(StopTreatment),
}

impl DiagnosisCommand {
    #[must_use]
    pub fn diagnosis_id(&self) -> Uuid {
        match self {
            Self::ConfirmDiagnosis(c) => c.diagnosis_id,
            Self::StartTreatment(c) => c.diagnosis_id,
            Self::StopTreatment(c) => c.diagnosis_id,
        }
    }
}
