use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use crate::config::{Thresholds, SAMPLES_PER_MINUTE};
use crate::db::reader::SampleReader;
use crate::db::writer::SummaryWriter;
use crate::detector::classifier::{classify_window, count_label_mismatches};
use crate::detector::signal;
use crate::detector::{ThresholdEstimator, ThresholdSuggestion};
use crate::error::Result;
use crate::scorer::DailyAggregator;
use crate::types::DailySummary;

/// What a completed run did. Faults come back as `AppError`.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The trailing window was empty; nothing was written.
    NoData,
    Saved {
        summary: DailySummary,
        /// Absent when the window was too small or did not cluster.
        suggestion: Option<ThresholdSuggestion>,
    },
}

/// One nightly pass: fetch → classify → estimate → aggregate → upsert.
pub struct NightlyAnalysis {
    reader: SampleReader,
    writer: SummaryWriter,
    thresholds: Thresholds,
    estimator: ThresholdEstimator,
    aggregator: DailyAggregator,
}

impl NightlyAnalysis {
    pub fn new(pool: sqlx::SqlitePool, thresholds: Thresholds) -> Self {
        Self {
            reader: SampleReader::new(pool.clone()),
            writer: SummaryWriter::new(pool),
            thresholds,
            estimator: ThresholdEstimator::default(),
            aggregator: DailyAggregator::new(SAMPLES_PER_MINUTE),
        }
    }

    /// `now` bounds the sample window; `today` keys the summary row.
    /// The key is the run date, not the date of the data, so a run just
    /// after midnight files the previous evening under the new day.
    pub async fn run(&self, now: DateTime<Utc>, today: NaiveDate) -> Result<RunOutcome> {
        let samples = self.reader.fetch_window(now).await?;
        if samples.is_empty() {
            info!("No data found for the last 24 hours");
            return Ok(RunOutcome::NoData);
        }
        info!("Loaded {} data points", samples.len());

        let states = classify_window(&samples, &self.thresholds)?;
        let mismatches = count_label_mismatches(&samples, &states);
        if mismatches > 0 {
            warn!(mismatches, "Stored state labels disagree with recomputed classification");
        }

        let accelerations: Vec<f64> = samples.iter().map(|s| s.acceleration).collect();

        let suggestion = self.estimator.suggest(&accelerations, &self.thresholds);
        if let Some(s) = &suggestion {
            info!("Today's detected clusters: {:?}", s.centers);
            info!(
                configured = s.configured_fidget_cutoff,
                drift = s.drift(),
                "Suggested new fidget threshold: {:.4}",
                s.fidget_cutoff
            );
        }

        if let Some(f) = signal::features(&accelerations) {
            info!(
                mean = f.mean,
                variance = f.variance,
                stationary = f.stationary,
                mobility = f.hjorth_mobility,
                complexity = f.hjorth_complexity,
                "Signal diagnostics"
            );
        }

        let summary = self.aggregator.summarize(&states, today);
        // informational only; an unreadable row is overwritten below
        match self.writer.fetch_summary(today).await {
            Ok(Some(previous)) => info!(
                previous_score = previous.activity_score,
                "Replacing existing summary for {}",
                today
            ),
            Ok(None) => {}
            Err(e) => warn!("Existing summary for {today} is unreadable, overwriting: {e}"),
        }
        self.writer.upsert_summary(&summary).await?;

        info!(
            date = %summary.date,
            sedentary_minutes = summary.sedentary_minutes,
            active_minutes = summary.active_minutes,
            dominant = %summary.dominant_state,
            "Analysis saved! Score: {}/100",
            summary.activity_score
        );

        Ok(RunOutcome::Saved { summary, suggestion })
    }
}
