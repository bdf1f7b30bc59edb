use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{SelectionField, TriageSelection};
use super::extraction::{ExtractionInput, PatientDataExtractor};
use super::history::TriageHistory;
use super::scoring::RESOURCE_BANDS;
use super::service::{TriageIntake, TriageService, TriageServiceError};

/// Router builder exposing the triage scoring endpoints.
pub fn triage_router<H, X>(service: Arc<TriageService<H, X>>) -> Router
where
    H: TriageHistory + 'static,
    X: PatientDataExtractor + 'static,
{
    Router::new()
        .route("/api/v1/triage/catalog", get(catalog_handler::<H, X>))
        .route("/api/v1/triage/resources", get(resources_handler))
        .route("/api/v1/triage/score", post(score_handler::<H, X>))
        .route(
            "/api/v1/triage/suggestions",
            post(suggestions_handler::<H, X>),
        )
        .route(
            "/api/v1/triage/patients",
            post(intake_handler::<H, X>)
                .get(history_handler::<H, X>)
                .delete(clear_history_handler::<H, X>),
        )
        .with_state(service)
}

pub(crate) async fn catalog_handler<H, X>(
    State(service): State<Arc<TriageService<H, X>>>,
) -> Response
where
    H: TriageHistory + 'static,
    X: PatientDataExtractor + 'static,
{
    (StatusCode::OK, axum::Json(service.catalog())).into_response()
}

pub(crate) async fn resources_handler() -> Response {
    (StatusCode::OK, axum::Json(RESOURCE_BANDS)).into_response()
}

pub(crate) async fn score_handler<H, X>(
    State(service): State<Arc<TriageService<H, X>>>,
    axum::Json(selection): axum::Json<TriageSelection>,
) -> Response
where
    H: TriageHistory + 'static,
    X: PatientDataExtractor + 'static,
{
    match service.summarize(&selection) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(TriageServiceError::Incomplete { missing }) => {
            incomplete_response(missing).into_response()
        }
        Err(other) => internal_error(other).into_response(),
    }
}

pub(crate) async fn suggestions_handler<H, X>(
    State(service): State<Arc<TriageService<H, X>>>,
    axum::Json(input): axum::Json<ExtractionInput>,
) -> Response
where
    H: TriageHistory + 'static,
    X: PatientDataExtractor + 'static,
{
    match service.suggest(&input) {
        Ok(suggestions) => (StatusCode::OK, axum::Json(suggestions)).into_response(),
        Err(TriageServiceError::Extraction(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "retryable": true,
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other).into_response(),
    }
}

pub(crate) async fn intake_handler<H, X>(
    State(service): State<Arc<TriageService<H, X>>>,
    axum::Json(intake): axum::Json<TriageIntake>,
) -> Response
where
    H: TriageHistory + 'static,
    X: PatientDataExtractor + 'static,
{
    match service.finalize(intake) {
        Ok(record) => {
            let view = record.history_view(service.catalog());
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(TriageServiceError::Incomplete { missing }) => {
            incomplete_response(missing).into_response()
        }
        Err(other) => internal_error(other).into_response(),
    }
}

pub(crate) async fn history_handler<H, X>(
    State(service): State<Arc<TriageService<H, X>>>,
) -> Response
where
    H: TriageHistory + 'static,
    X: PatientDataExtractor + 'static,
{
    match service.history() {
        Ok(records) => {
            let views: Vec<_> = records
                .iter()
                .map(|record| record.history_view(service.catalog()))
                .collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => internal_error(error).into_response(),
    }
}

pub(crate) async fn clear_history_handler<H, X>(
    State(service): State<Arc<TriageService<H, X>>>,
) -> Response
where
    H: TriageHistory + 'static,
    X: PatientDataExtractor + 'static,
{
    match service.clear_history() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => internal_error(error).into_response(),
    }
}

fn incomplete_response(
    missing: Vec<SelectionField>,
) -> (StatusCode, axum::Json<serde_json::Value>) {
    let labels: Vec<&str> = missing.iter().map(|field| field.label()).collect();
    let payload = json!({
        "error": "Por favor, complete todos los campos del C.C.E.E.",
        "missing": missing,
        "missing_labels": labels,
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload))
}

fn internal_error(error: TriageServiceError) -> (StatusCode, axum::Json<serde_json::Value>) {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload))
}
