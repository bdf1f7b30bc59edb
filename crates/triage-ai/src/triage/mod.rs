//! Evacuation triage scoring: category catalog, working selection, composite
//! C.C.E.E. total, transport-resource recommendation, AI-assisted prefill,
//! and the in-session history of completed triages.

pub mod catalog;
pub mod domain;
pub mod extraction;
pub mod history;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{
    CategoryOption, FepColor, FepLevel, OxygenNeedOption, TriageCatalog, UnitTypeOption,
};
pub use domain::{
    CompletedTriage, Score, ScoreOutOfRange, SelectionError, SelectionField, TriageSelection,
    UnitScaleScore, UnitType,
};
pub use extraction::{
    extraction_prompt, ExtractionError, ExtractionInput, PatientDataExtractor, ScoreSuggestions,
};
pub use history::{
    EntryId, HistoryError, TriageHistory, TriageRecordView, TriagedPatientRecord,
    UNIDENTIFIED_PATIENT,
};
pub use router::triage_router;
pub use scoring::{
    composite_total, recommend, ResourceBand, ScoreComponent, ScoreSummary, RESOURCE_BANDS,
};
pub use service::{TriageIntake, TriageService, TriageServiceError};
