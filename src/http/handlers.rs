use super::state::AppState;
use crate::bindings::Affordance;
use crate::report::REPORT_KEY;
use crate::session::{Outcome, SessionView};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct AffordanceResponse {
    pub affordance: Affordance,
    pub outcome: Outcome,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: String) -> axum::response::Response {
    (status, Json(ErrorResponse { error })).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /session
pub async fn get_session(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.controller.snapshot())
}

/// POST /affordances/:affordance
/// Press a control; disabled controls resolve as `ignored`
pub async fn press_affordance(
    State(state): State<AppState>,
    Path(affordance): Path<String>,
) -> impl IntoResponse {
    let affordance: Affordance = match affordance.parse() {
        Ok(a) => a,
        Err(e) => return error_response(StatusCode::NOT_FOUND, e),
    };

    info!("Control pressed: {}", affordance);

    match state
        .bindings
        .dispatch(affordance, Arc::clone(&state.controller))
        .await
    {
        Some(outcome) => (
            StatusCode::OK,
            Json(AffordanceResponse {
                affordance,
                outcome,
                session: state.controller.snapshot(),
            }),
        )
            .into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("No binding for {}", affordance),
        ),
    }
}

/// DELETE /status/:entry_id
pub async fn dismiss_status(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> impl IntoResponse {
    if state.controller.dismiss_status(entry_id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error_response(
            StatusCode::NOT_FOUND,
            format!("Status entry {} not found", entry_id),
        )
    }
}

/// GET /report
pub async fn get_report(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.get(REPORT_KEY).await {
        Ok(Some(report)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            report,
        )
            .into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "No report available".to_string()),
        Err(e) => {
            error!("Failed to read report: {:#}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to read report: {}", e),
            )
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
