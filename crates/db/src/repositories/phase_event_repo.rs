//! Repository for the `phase_events` table.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::phase_event::{CreatePhaseEvent, PhaseEventRow};

/// Column list for `phase_events` SELECT queries.
const COLUMNS: &str = "target_id, phase_timestamp, phase";

/// One full read of the event table, as consumed by the dashboard pipeline.
#[derive(Debug, Clone, Default)]
pub struct EventSnapshot {
    /// Every recorded event, ordered by timestamp. Consumers must not rely
    /// on this ordering; the aggregation pipeline re-sorts its buckets.
    pub events: Vec<PhaseEventRow>,
    /// Distinct calendar dates present in the data, ascending.
    pub dates: Vec<NaiveDate>,
}

/// Provides query operations for phase events.
pub struct PhaseEventRepo;

impl PhaseEventRepo {
    /// Insert a single phase event.
    pub async fn insert(
        pool: &PgPool,
        event: &CreatePhaseEvent,
    ) -> Result<PhaseEventRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO phase_events ({COLUMNS}) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PhaseEventRow>(&query)
            .bind(&event.target_id)
            .bind(event.phase_timestamp)
            .bind(&event.phase)
            .fetch_one(pool)
            .await
    }

    /// Get all phase events, ordered by timestamp.
    pub async fn fetch_all(pool: &PgPool) -> Result<Vec<PhaseEventRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM phase_events ORDER BY phase_timestamp");
        sqlx::query_as::<_, PhaseEventRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Get the distinct calendar dates present in the table, ascending.
    pub async fn distinct_dates(pool: &PgPool) -> Result<Vec<NaiveDate>, sqlx::Error> {
        let rows: Vec<(NaiveDate,)> = sqlx::query_as(
            "SELECT DISTINCT DATE(phase_timestamp) FROM phase_events \
             ORDER BY DATE(phase_timestamp)",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(date,)| date).collect())
    }

    /// Fetch a full [`EventSnapshot`], failing closed.
    ///
    /// Any retrieval error is logged and converted into an empty snapshot so
    /// the dashboard degrades to empty charts instead of erroring. The next
    /// refresh tick is the retry mechanism.
    pub async fn snapshot(pool: &PgPool) -> EventSnapshot {
        let events = match Self::fetch_all(pool).await {
            Ok(events) => events,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch phase events, serving empty snapshot");
                return EventSnapshot::default();
            }
        };
        let dates = match Self::distinct_dates(pool).await {
            Ok(dates) => dates,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch distinct dates, serving empty snapshot");
                return EventSnapshot::default();
            }
        };

        tracing::debug!(rows = events.len(), dates = dates.len(), "Fetched event snapshot");
        EventSnapshot { events, dates }
    }
}
