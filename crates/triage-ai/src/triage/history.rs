use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::TriageCatalog;
use super::domain::{Score, TriageSelection};
use super::scoring;

/// Sentinel shown when intake left the patient identifier blank.
pub const UNIDENTIFIED_PATIENT: &str = "N/A";

/// Identifier wrapper for recorded triage entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub String);

/// Immutable snapshot of one completed triage. Created once, appended to the
/// session history, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriagedPatientRecord {
    pub entry_id: EntryId,
    pub patient_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_image: Option<String>,
    pub fep_score: Score,
    pub selection: TriageSelection,
    pub total_score: u8,
    pub recorded_at: DateTime<Utc>,
}

impl TriagedPatientRecord {
    pub fn history_view(&self, catalog: &TriageCatalog) -> TriageRecordView {
        let unit_label = self
            .selection
            .unit_type()
            .and_then(|unit_type| catalog.unit_type_option(unit_type))
            .map(|option| option.label.to_string())
            .unwrap_or_else(|| "Desconocido".to_string());
        let recommendation = scoring::recommend(self.total_score);

        TriageRecordView {
            entry_id: self.entry_id.clone(),
            patient_id: self.patient_id.clone(),
            has_captured_image: self.captured_image.is_some(),
            fep_score: self.fep_score,
            unit_label,
            total_score: self.total_score,
            resource_type: recommendation.map(|band| band.resource_type),
            crew: recommendation.map(|band| band.crew),
            recorded_at: self.recorded_at,
        }
    }
}

/// Session history store. Single logical writer; `list` returns defensive
/// copies, newest first.
pub trait TriageHistory: Send + Sync {
    fn record(&self, record: TriagedPatientRecord) -> Result<(), HistoryError>;
    fn list(&self) -> Result<Vec<TriagedPatientRecord>, HistoryError>;
    fn clear(&self) -> Result<(), HistoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history unavailable: {0}")]
    Unavailable(String),
}

/// Flattened record representation for history listings.
#[derive(Debug, Clone, Serialize)]
pub struct TriageRecordView {
    pub entry_id: EntryId,
    pub patient_id: String,
    pub has_captured_image: bool,
    pub fep_score: Score,
    pub unit_label: String,
    pub total_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crew: Option<&'static str>,
    pub recorded_at: DateTime<Utc>,
}
