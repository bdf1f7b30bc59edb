use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use triage_ai::triage::{
    ExtractionError, ExtractionInput, HistoryError, PatientDataExtractor, Score, ScoreSuggestions,
    TriageHistory, TriagedPatientRecord, UnitType,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-session history: an append-only list with no persistence. `list`
/// returns newest-first copies so callers can never mutate the store.
#[derive(Default)]
pub(crate) struct InMemoryTriageHistory {
    records: Mutex<Vec<TriagedPatientRecord>>,
}

impl TriageHistory for InMemoryTriageHistory {
    fn record(&self, record: TriagedPatientRecord) -> Result<(), HistoryError> {
        let mut guard = self.records.lock().expect("history mutex poisoned");
        guard.push(record);
        Ok(())
    }

    fn list(&self) -> Result<Vec<TriagedPatientRecord>, HistoryError> {
        let guard = self.records.lock().expect("history mutex poisoned");
        Ok(guard.iter().rev().cloned().collect())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        let mut guard = self.records.lock().expect("history mutex poisoned");
        guard.clear();
        Ok(())
    }
}

/// Serving default until an extraction transport is wired in deployment: the
/// suggestions endpoint stays up and reports a retryable notice.
pub(crate) struct UnconfiguredExtractor;

impl PatientDataExtractor for UnconfiguredExtractor {
    fn extract(&self, _input: &ExtractionInput) -> Result<ScoreSuggestions, ExtractionError> {
        Err(ExtractionError::Unconfigured)
    }
}

/// Extractor returning a fixed suggestion set, used by the CLI demo.
#[derive(Default, Clone)]
pub(crate) struct ScriptedExtractor {
    pub(crate) suggestions: ScoreSuggestions,
}

impl PatientDataExtractor for ScriptedExtractor {
    fn extract(&self, _input: &ExtractionInput) -> Result<ScoreSuggestions, ExtractionError> {
        Ok(self.suggestions.clone())
    }
}

pub(crate) fn parse_score(raw: &str) -> Result<Score, String> {
    let value = raw
        .trim()
        .parse::<u8>()
        .map_err(|err| format!("failed to parse '{raw}' as a score ({err})"))?;
    Score::try_from(value).map_err(|err| err.to_string())
}

pub(crate) fn parse_unit_type(raw: &str) -> Result<UnitType, String> {
    UnitType::from_key(raw.trim()).ok_or_else(|| {
        let keys: Vec<&str> = UnitType::ALL.iter().map(|unit| unit.key()).collect();
        format!("unknown unit type '{raw}' (expected one of: {})", keys.join(", "))
    })
}
