use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::config::WINDOW_HOURS;
use crate::db::models::SampleRow;
use crate::error::Result;
use crate::types::Sample;

/// Reads the trailing sample window from `sedentary_log`.
pub struct SampleReader {
    pool: sqlx::SqlitePool,
}

impl SampleReader {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }

    /// Samples recorded strictly after `now - 24h`, oldest first.
    pub async fn fetch_window(&self, now: DateTime<Utc>) -> Result<Vec<Sample>> {
        let since = (now - Duration::hours(WINDOW_HOURS)).timestamp_millis();

        let rows = sqlx::query_as::<_, SampleRow>(
            r#"
            SELECT recorded_at, acceleration_val, state
            FROM sedentary_log
            WHERE recorded_at > ?
            ORDER BY recorded_at ASC, id ASC
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        debug!(since, rows = rows.len(), "Fetched sample window");
        rows.into_iter().map(Sample::try_from).collect()
    }
}

/// Test-only ingest helper mirroring what the logger service writes.
#[cfg(test)]
pub async fn insert_samples(pool: &sqlx::SqlitePool, samples: &[Sample]) -> Result<()> {
    let mut tx = pool.begin().await?;
    for s in samples {
        sqlx::query(
            "INSERT INTO sedentary_log (recorded_at, acceleration_val, state) VALUES (?, ?, ?)",
        )
        .bind(s.timestamp.timestamp_millis())
        .bind(s.acceleration)
        .bind(s.state.map(|st| st.to_string()))
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}
