//! Database row types for the sample log and the daily summary table.
//! Used by sqlx for typed queries.

use chrono::{DateTime, NaiveDate};

use crate::error::{AppError, Result};
use crate::types::{ActivityState, DailySummary, DominantState, Sample};

#[derive(Debug, sqlx::FromRow)]
pub struct SampleRow {
    pub recorded_at: i64,
    pub acceleration_val: f64,
    pub state: Option<String>,
}

impl TryFrom<SampleRow> for Sample {
    type Error = AppError;

    fn try_from(row: SampleRow) -> Result<Self> {
        let timestamp = DateTime::from_timestamp_millis(row.recorded_at).ok_or_else(|| {
            AppError::Computation(format!("recorded_at out of range: {}", row.recorded_at))
        })?;
        Ok(Sample {
            timestamp,
            acceleration: row.acceleration_val,
            state: row.state.as_deref().and_then(ActivityState::from_label),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct SummaryRow {
    pub date: NaiveDate,
    pub sedentary_minutes: f64,
    pub active_minutes: f64,
    pub dominant_state: String,
    pub activity_score: i64,
}

impl TryFrom<SummaryRow> for DailySummary {
    type Error = AppError;

    fn try_from(row: SummaryRow) -> Result<Self> {
        let dominant_state = DominantState::from_label(&row.dominant_state).ok_or_else(|| {
            AppError::Computation(format!("unknown dominant_state {:?}", row.dominant_state))
        })?;
        let activity_score = u8::try_from(row.activity_score)
            .ok()
            .filter(|s| *s <= 100)
            .ok_or_else(|| {
                AppError::Computation(format!("activity_score out of range: {}", row.activity_score))
            })?;
        Ok(DailySummary {
            date: row.date,
            sedentary_minutes: row.sedentary_minutes,
            active_minutes: row.active_minutes,
            dominant_state,
            activity_score,
        })
    }
}
