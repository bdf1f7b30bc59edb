use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::triage::domain::{Score, TriageSelection, UnitType};
use crate::triage::extraction::{
    ExtractionError, ExtractionInput, PatientDataExtractor, ScoreSuggestions,
};
use crate::triage::history::{HistoryError, TriageHistory, TriagedPatientRecord};
use crate::triage::service::TriageService;

pub(super) fn score(value: u8) -> Score {
    Score::try_from(value).expect("valid score")
}

pub(super) fn completed_selection() -> TriageSelection {
    TriageSelection::new()
        .with_fep(score(3))
        .with_oxygen_need(score(2))
        .with_vital_signs_control(score(4))
        .with_medication_and_nutrition(score(1))
        .with_unit_type(UnitType::Icu)
        .with_unit_scale(score(5))
        .expect("unit type chosen")
}

pub(super) fn sample_input() -> ExtractionInput {
    ExtractionInput {
        patient_notes: "Paciente sedado, intubado, portador de SNG.".to_string(),
        lab_results: "Gasometría: pO2 54 mmHg.".to_string(),
    }
}

#[derive(Default)]
pub(super) struct MemoryHistory {
    records: Mutex<Vec<TriagedPatientRecord>>,
}

impl TriageHistory for MemoryHistory {
    fn record(&self, record: TriagedPatientRecord) -> Result<(), HistoryError> {
        self.records
            .lock()
            .expect("history mutex poisoned")
            .push(record);
        Ok(())
    }

    fn list(&self) -> Result<Vec<TriagedPatientRecord>, HistoryError> {
        let guard = self.records.lock().expect("history mutex poisoned");
        Ok(guard.iter().rev().cloned().collect())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        self.records
            .lock()
            .expect("history mutex poisoned")
            .clear();
        Ok(())
    }
}

pub(super) struct UnavailableHistory;

impl TriageHistory for UnavailableHistory {
    fn record(&self, _record: TriagedPatientRecord) -> Result<(), HistoryError> {
        Err(HistoryError::Unavailable("store offline".to_string()))
    }

    fn list(&self) -> Result<Vec<TriagedPatientRecord>, HistoryError> {
        Err(HistoryError::Unavailable("store offline".to_string()))
    }

    fn clear(&self) -> Result<(), HistoryError> {
        Err(HistoryError::Unavailable("store offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct ScriptedExtractor {
    pub(super) suggestions: ScoreSuggestions,
}

impl PatientDataExtractor for ScriptedExtractor {
    fn extract(&self, _input: &ExtractionInput) -> Result<ScoreSuggestions, ExtractionError> {
        Ok(self.suggestions.clone())
    }
}

pub(super) struct FailingExtractor;

impl PatientDataExtractor for FailingExtractor {
    fn extract(&self, _input: &ExtractionInput) -> Result<ScoreSuggestions, ExtractionError> {
        Err(ExtractionError::Transport("model endpoint timed out".to_string()))
    }
}

pub(super) fn build_service() -> (
    Arc<TriageService<MemoryHistory, ScriptedExtractor>>,
    Arc<MemoryHistory>,
) {
    let history = Arc::new(MemoryHistory::default());
    let extractor = Arc::new(ScriptedExtractor::default());
    let service = Arc::new(TriageService::new(history.clone(), extractor));
    (service, history)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
