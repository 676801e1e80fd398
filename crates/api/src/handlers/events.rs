//! Handler for recording phase events.
//!
//! The dashboard itself only reads; this endpoint exists so tracked systems
//! can report phase changes through the same service instead of writing to
//! the table directly.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use phasedash_core::CoreError;
use phasedash_db::models::phase_event::CreatePhaseEvent;
use phasedash_db::repositories::PhaseEventRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /events
///
/// Record a single phase change. Duplicates are accepted; the table has no
/// uniqueness constraint and every event counts independently.
pub async fn create_event(
    State(state): State<AppState>,
    Json(body): Json<CreatePhaseEvent>,
) -> AppResult<impl IntoResponse> {
    validate_event(&body)?;

    let row = PhaseEventRepo::insert(&state.pool, &body).await?;
    tracing::debug!(target_id = %row.target_id, phase = %row.phase, "Recorded phase event");

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

fn validate_event(event: &CreatePhaseEvent) -> Result<(), CoreError> {
    if event.target_id.trim().is_empty() {
        return Err(CoreError::Validation("target_id must not be empty".into()));
    }
    if event.phase.trim().is_empty() {
        return Err(CoreError::Validation("phase must not be empty".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDateTime;

    fn event(target_id: &str, phase: &str) -> CreatePhaseEvent {
        CreatePhaseEvent {
            target_id: target_id.to_string(),
            phase_timestamp: NaiveDateTime::parse_from_str(
                "2024-04-01 08:00:00",
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
            phase: phase.to_string(),
        }
    }

    #[test]
    fn valid_event_passes() {
        assert!(validate_event(&event("E1", "Start")).is_ok());
    }

    #[test]
    fn blank_target_id_rejected() {
        assert_matches!(
            validate_event(&event("  ", "Start")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn blank_phase_rejected() {
        assert_matches!(
            validate_event(&event("E1", "")),
            Err(CoreError::Validation(_))
        );
    }
}
