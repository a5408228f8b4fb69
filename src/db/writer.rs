use chrono::NaiveDate;
use tracing::debug;

use crate::db::models::SummaryRow;
use crate::error::Result;
use crate::types::DailySummary;

/// Persists daily summaries, one row per calendar date.
pub struct SummaryWriter {
    pool: sqlx::SqlitePool,
}

impl SummaryWriter {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the summary for its date, or overwrite the existing row.
    /// Runs in one transaction so all fields land together or not at all.
    /// dominant_state is refreshed on conflict as well, keeping it consistent
    /// with the minutes it was derived from.
    pub async fn upsert_summary(&self, summary: &DailySummary) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO activity_summary (
                date, sedentary_minutes, active_minutes, dominant_state, activity_score
            ) VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(date) DO UPDATE SET
                sedentary_minutes = excluded.sedentary_minutes,
                active_minutes = excluded.active_minutes,
                dominant_state = excluded.dominant_state,
                activity_score = excluded.activity_score
            "#,
        )
        .bind(summary.date)
        .bind(summary.sedentary_minutes)
        .bind(summary.active_minutes)
        .bind(summary.dominant_state.to_string())
        .bind(i64::from(summary.activity_score))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!(date = %summary.date, "Upserted activity summary");
        Ok(())
    }

    pub async fn fetch_summary(&self, date: NaiveDate) -> Result<Option<DailySummary>> {
        let row = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT date, sedentary_minutes, active_minutes, dominant_state, activity_score
            FROM activity_summary
            WHERE date = ?
            "#,
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        row.map(DailySummary::try_from).transpose()
    }

    #[cfg(test)]
    pub async fn count_summaries(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activity_summary")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::types::DominantState;

    fn summary(day: u32, sedentary: f64, active: f64, dominant: DominantState, score: u8) -> DailySummary {
        DailySummary {
            date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            sedentary_minutes: sedentary,
            active_minutes: active,
            dominant_state: dominant,
            activity_score: score,
        }
    }

    #[tokio::test]
    async fn insert_then_read_back() {
        let writer = SummaryWriter::new(test_pool().await);
        let s = summary(18, 0.33, 0.0, DominantState::Sedentary, 0);
        writer.upsert_summary(&s).await.unwrap();

        assert_eq!(writer.fetch_summary(s.date).await.unwrap(), Some(s));
        assert_eq!(writer.count_summaries().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn same_date_overwrites_instead_of_duplicating() {
        let writer = SummaryWriter::new(test_pool().await);
        let first = summary(18, 2.0, 1.0, DominantState::Sedentary, 33);
        let second = summary(18, 1.0, 3.0, DominantState::Active, 75);

        writer.upsert_summary(&first).await.unwrap();
        writer.upsert_summary(&second).await.unwrap();

        assert_eq!(writer.count_summaries().await.unwrap(), 1);
        assert_eq!(writer.fetch_summary(second.date).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn repeated_upsert_is_idempotent() {
        let writer = SummaryWriter::new(test_pool().await);
        let s = summary(18, 0.5, 0.5, DominantState::Sedentary, 50);
        writer.upsert_summary(&s).await.unwrap();
        writer.upsert_summary(&s).await.unwrap();

        assert_eq!(writer.count_summaries().await.unwrap(), 1);
        assert_eq!(writer.fetch_summary(s.date).await.unwrap(), Some(s));
    }

    #[tokio::test]
    async fn different_dates_get_separate_rows() {
        let writer = SummaryWriter::new(test_pool().await);
        writer.upsert_summary(&summary(17, 1.0, 0.0, DominantState::Sedentary, 0)).await.unwrap();
        writer.upsert_summary(&summary(18, 0.0, 1.0, DominantState::Active, 100)).await.unwrap();
        assert_eq!(writer.count_summaries().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn missing_date_reads_none() {
        let writer = SummaryWriter::new(test_pool().await);
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(writer.fetch_summary(date).await.unwrap(), None);
    }
}
