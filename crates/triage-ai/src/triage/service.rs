use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::catalog::TriageCatalog;
use super::domain::{SelectionField, TriageSelection};
use super::extraction::{ExtractionError, ExtractionInput, PatientDataExtractor, ScoreSuggestions};
use super::history::{
    EntryId, HistoryError, TriageHistory, TriagedPatientRecord, UNIDENTIFIED_PATIENT,
};
use super::scoring::{self, ScoreSummary};

static ENTRY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_entry_id() -> EntryId {
    let id = ENTRY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EntryId(format!("triage-{id:06}"))
}

/// Intake payload for a completed triage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageIntake {
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub captured_image: Option<String>,
    pub selection: TriageSelection,
}

/// Service composing the catalog, scoring, history store, and extraction
/// backend behind one surface shared by the HTTP routes and the CLI.
pub struct TriageService<H, X> {
    catalog: TriageCatalog,
    history: Arc<H>,
    extractor: Arc<X>,
}

impl<H, X> TriageService<H, X>
where
    H: TriageHistory + 'static,
    X: PatientDataExtractor + 'static,
{
    pub fn new(history: Arc<H>, extractor: Arc<X>) -> Self {
        Self {
            catalog: TriageCatalog::standard(),
            history,
            extractor,
        }
    }

    pub fn catalog(&self) -> &TriageCatalog {
        &self.catalog
    }

    /// Compute the composite summary for a working selection.
    pub fn summarize(&self, selection: &TriageSelection) -> Result<ScoreSummary, TriageServiceError> {
        scoring::summarize(selection, &self.catalog).ok_or_else(|| TriageServiceError::Incomplete {
            missing: selection.missing_fields(),
        })
    }

    /// Ask the extraction backend for prefill suggestions. The working
    /// selection is untouched here; callers merge the result explicitly.
    pub fn suggest(&self, input: &ExtractionInput) -> Result<ScoreSuggestions, TriageServiceError> {
        let suggestions = self.extractor.extract(input)?;
        info!(
            empty = suggestions.is_empty(),
            "clinical-text extraction completed"
        );
        Ok(suggestions)
    }

    /// Snapshot a completed selection into the session history.
    pub fn finalize(&self, intake: TriageIntake) -> Result<TriagedPatientRecord, TriageServiceError> {
        let TriageIntake {
            patient_id,
            captured_image,
            selection,
        } = intake;

        let completed = selection
            .completed()
            .ok_or_else(|| TriageServiceError::Incomplete {
                missing: selection.missing_fields(),
            })?;

        let patient_id = patient_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| UNIDENTIFIED_PATIENT.to_string());

        let record = TriagedPatientRecord {
            entry_id: next_entry_id(),
            patient_id,
            captured_image,
            fep_score: completed.fep,
            selection,
            total_score: completed.total(),
            recorded_at: Utc::now(),
        };

        self.history.record(record.clone())?;
        info!(
            entry_id = %record.entry_id.0,
            total_score = record.total_score,
            "triage recorded"
        );

        Ok(record)
    }

    pub fn history(&self) -> Result<Vec<TriagedPatientRecord>, TriageServiceError> {
        Ok(self.history.list()?)
    }

    pub fn clear_history(&self) -> Result<(), TriageServiceError> {
        self.history.clear()?;
        info!("session history cleared");
        Ok(())
    }
}

/// Error raised by the triage service.
#[derive(Debug, thiserror::Error)]
pub enum TriageServiceError {
    #[error("selection incomplete: {} field(s) unset", missing.len())]
    Incomplete { missing: Vec<SelectionField> },
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}
