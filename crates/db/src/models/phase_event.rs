//! Phase event entity model and DTOs.

use chrono::NaiveDateTime;
use phasedash_core::PhaseEvent;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `phase_events` table.
///
/// No uniqueness constraint exists on this table: duplicate events are valid
/// data and each counts independently in aggregation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PhaseEventRow {
    pub target_id: String,
    pub phase_timestamp: NaiveDateTime,
    pub phase: String,
}

impl From<PhaseEventRow> for PhaseEvent {
    fn from(row: PhaseEventRow) -> Self {
        PhaseEvent {
            target_id: row.target_id,
            timestamp: row.phase_timestamp,
            phase: row.phase,
        }
    }
}

/// DTO for recording a phase change.
#[derive(Debug, Deserialize)]
pub struct CreatePhaseEvent {
    pub target_id: String,
    pub phase_timestamp: NaiveDateTime,
    pub phase: String,
}
