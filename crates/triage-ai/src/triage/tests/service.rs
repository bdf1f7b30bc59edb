use std::sync::Arc;

use super::common::*;
use crate::triage::domain::{SelectionField, TriageSelection, UnitType};
use crate::triage::extraction::{ExtractionError, ScoreSuggestions};
use crate::triage::history::{TriageHistory, UNIDENTIFIED_PATIENT};
use crate::triage::service::{TriageIntake, TriageService, TriageServiceError};

fn intake(selection: TriageSelection) -> TriageIntake {
    TriageIntake {
        patient_id: Some("Cama 12".to_string()),
        captured_image: None,
        selection,
    }
}

#[test]
fn finalize_records_an_immutable_snapshot() {
    let (service, _history) = build_service();

    let record = service
        .finalize(intake(completed_selection()))
        .expect("intake accepted");

    assert_eq!(record.patient_id, "Cama 12");
    assert_eq!(record.total_score, 15);
    assert_eq!(record.fep_score.get(), 3);
    assert!(record.entry_id.0.starts_with("triage-"));
    assert_eq!(record.selection.unit_type(), Some(UnitType::Icu));

    let listed = service.history().expect("history available");
    assert_eq!(listed, vec![record]);
}

#[test]
fn blank_patient_ids_fall_back_to_the_sentinel() {
    let (service, _history) = build_service();

    let blank = TriageIntake {
        patient_id: Some("   ".to_string()),
        captured_image: None,
        selection: completed_selection(),
    };
    let record = service.finalize(blank).expect("intake accepted");
    assert_eq!(record.patient_id, UNIDENTIFIED_PATIENT);

    let absent = TriageIntake {
        patient_id: None,
        captured_image: None,
        selection: completed_selection(),
    };
    let record = service.finalize(absent).expect("intake accepted");
    assert_eq!(record.patient_id, UNIDENTIFIED_PATIENT);
}

#[test]
fn captured_images_are_carried_through_untouched() {
    let (service, _history) = build_service();

    let with_image = TriageIntake {
        patient_id: Some("Box 3".to_string()),
        captured_image: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
        selection: completed_selection(),
    };
    let record = service.finalize(with_image).expect("intake accepted");
    assert_eq!(
        record.captured_image.as_deref(),
        Some("data:image/png;base64,iVBORw0KGgo=")
    );

    let view = record.history_view(service.catalog());
    assert!(view.has_captured_image);
    assert_eq!(view.unit_label, "UCI / UVI");
    assert_eq!(view.resource_type, Some("C - USVA.E"));
}

#[test]
fn entry_ids_are_unique_per_record() {
    let (service, _history) = build_service();

    let first = service
        .finalize(intake(completed_selection()))
        .expect("intake accepted");
    let second = service
        .finalize(intake(completed_selection()))
        .expect("intake accepted");
    assert_ne!(first.entry_id, second.entry_id);
}

#[test]
fn incomplete_selections_are_rejected_with_missing_fields() {
    let (service, history) = build_service();

    let partial = completed_selection().with_unit_type(UnitType::Psychiatric);
    let error = service
        .finalize(intake(partial))
        .expect_err("incomplete intake rejected");

    match error {
        TriageServiceError::Incomplete { missing } => {
            assert_eq!(missing, vec![SelectionField::UnitSpecificScale]);
        }
        other => panic!("expected incomplete error, got {other:?}"),
    }

    assert!(history.list().expect("history available").is_empty());
}

#[test]
fn history_failures_surface_without_recording() {
    let service = TriageService::new(
        Arc::new(UnavailableHistory),
        Arc::new(ScriptedExtractor::default()),
    );

    let error = service
        .finalize(intake(completed_selection()))
        .expect_err("history offline");
    assert!(matches!(error, TriageServiceError::History(_)));
}

#[test]
fn suggest_passes_scripted_suggestions_through() {
    let history = Arc::new(MemoryHistory::default());
    let extractor = Arc::new(ScriptedExtractor {
        suggestions: ScoreSuggestions {
            oxygen_need: Some(score(5)),
            reasoning: "permanent mechanical ventilation".to_string(),
            ..ScoreSuggestions::default()
        },
    });
    let service = TriageService::new(history, extractor);

    let suggestions = service.suggest(&sample_input()).expect("extraction ok");
    assert_eq!(suggestions.oxygen_need, Some(score(5)));
    assert!(suggestions.reasoning.contains("ventilation"));
}

#[test]
fn suggest_maps_extraction_failures_to_service_errors() {
    let service = TriageService::new(Arc::new(MemoryHistory::default()), Arc::new(FailingExtractor));

    let error = service
        .suggest(&sample_input())
        .expect_err("extraction offline");
    assert!(matches!(
        error,
        TriageServiceError::Extraction(ExtractionError::Transport(_))
    ));
}

#[test]
fn clear_history_empties_the_session_list() {
    let (service, _history) = build_service();

    service
        .finalize(intake(completed_selection()))
        .expect("intake accepted");
    assert_eq!(service.history().expect("history available").len(), 1);

    service.clear_history().expect("clear succeeds");
    assert!(service.history().expect("history available").is_empty());
}
