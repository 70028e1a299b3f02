//! Commands accepted by the `Observation` aggregate.

use clinical_core::CommandContext;
use serde_json::Map;
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RecordVitalSigns {
    pub encounter_id: Uuid,
    pub patient_id: Uuid,
    pub readings: Map<String, Value>,
    pub ctx: CommandContext,
}

#[derive(Debug, Clone)]
pub struct ReportSymptom {
    pub encounter_id: Uuid,
    pub patient_id: Uuid,
    pub symptom: String,
    pub severity: String,
    pub ctx: CommandContext,
}

#[derive(Debug, Clone)]
pub enum ObservationCommand {
    RecordVitalSigns(RecordVitalSigns),
    ReportSymptom(ReportSymptom),
}

impl ObservationCommand {
    #[must_use]
    pub fn encounter_id(&self) -> Uuid {
        match self {
            Self::RecordVitalSigns(c) => c.encounter_id,
            Self::ReportSymptom(c) => c.encounter_id,
        }
    }
}
