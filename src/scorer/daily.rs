use chrono::NaiveDate;
use tracing::debug;

use crate::types::{ActivityState, DailySummary, DominantState, StateCounts};

/// Reduces a classified window to one `DailySummary`.
pub struct DailyAggregator {
    samples_per_minute: f64,
}

impl DailyAggregator {
    pub fn new(samples_per_minute: f64) -> Self {
        Self { samples_per_minute }
    }

    pub fn summarize(&self, states: &[ActivityState], date: NaiveDate) -> DailySummary {
        let counts: StateCounts = states.iter().copied().collect();
        self.summarize_counts(&counts, date)
    }

    /// FIDGET counts toward active time. Fidget and active samples are
    /// summed before the minute conversion, so only one rounding applies.
    pub fn summarize_counts(&self, counts: &StateCounts, date: NaiveDate) -> DailySummary {
        debug!(
            samples = counts.total(),
            sedentary = counts.sedentary,
            fidget = counts.fidget,
            active = counts.active,
            "Aggregating state counts"
        );
        let sedentary_minutes = self.minutes(counts.sedentary);
        let active_minutes = self.minutes(counts.fidget + counts.active);

        let dominant_state = if active_minutes > sedentary_minutes {
            DominantState::Active
        } else {
            DominantState::Sedentary
        };

        DailySummary {
            date,
            sedentary_minutes,
            active_minutes,
            dominant_state,
            activity_score: activity_score(sedentary_minutes, active_minutes),
        }
    }

    /// Sample count to minutes, rounded to 2 decimals.
    fn minutes(&self, count: u64) -> f64 {
        round2(count as f64 / self.samples_per_minute)
    }
}

/// Percentage of active minutes, truncated toward zero (a floor, not rounding).
/// Zero when no time was recorded.
pub fn activity_score(sedentary_minutes: f64, active_minutes: f64) -> u8 {
    let total = sedentary_minutes + active_minutes;
    if total <= 0.0 {
        return 0;
    }
    ((active_minutes / total) * 100.0).floor().clamp(0.0, 100.0) as u8
}

/// Rounds the exact binary value of `x` to 2 decimals, ties to even.
/// `x * 100` alone would round first and manufacture ties (9/600 reads as
/// 1.5 after scaling although the stored value sits just below 0.015).
fn round2(x: f64) -> f64 {
    let lower = (x * 100.0).floor();
    // sign of x*200 - (2*lower + 1), computed with a single rounding
    let vs_midpoint = x.mul_add(200.0, -(2.0 * lower + 1.0));
    let hundredths = if vs_midpoint > 0.0 {
        lower + 1.0
    } else if vs_midpoint < 0.0 {
        lower
    } else if lower % 2.0 == 0.0 {
        lower
    } else {
        lower + 1.0
    };
    hundredths / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SAMPLES_PER_MINUTE;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn aggregator() -> DailyAggregator {
        DailyAggregator::new(SAMPLES_PER_MINUTE)
    }

    fn window(sedentary: usize, fidget: usize, active: usize) -> Vec<ActivityState> {
        let mut states = vec![ActivityState::Sedentary; sedentary];
        states.extend(vec![ActivityState::Fidget; fidget]);
        states.extend(vec![ActivityState::Active; active]);
        states
    }

    #[test]
    fn all_sedentary_scores_zero() {
        let s = aggregator().summarize(&window(200, 0, 0), date());
        assert_eq!(s.sedentary_minutes, 0.33);
        assert_eq!(s.active_minutes, 0.0);
        assert_eq!(s.activity_score, 0);
        assert_eq!(s.dominant_state, DominantState::Sedentary);
        assert_eq!(s.date, date());
    }

    #[test]
    fn all_active_scores_hundred() {
        let s = aggregator().summarize(&window(0, 0, 600), date());
        assert_eq!(s.active_minutes, 1.0);
        assert_eq!(s.sedentary_minutes, 0.0);
        assert_eq!(s.activity_score, 100);
        assert_eq!(s.dominant_state, DominantState::Active);
    }

    #[test]
    fn tie_resolves_to_sedentary() {
        let s = aggregator().summarize(&window(300, 0, 300), date());
        assert_eq!(s.sedentary_minutes, 0.5);
        assert_eq!(s.active_minutes, 0.5);
        assert_eq!(s.activity_score, 50);
        assert_eq!(s.dominant_state, DominantState::Sedentary);
    }

    #[test]
    fn fidget_counts_as_active_time() {
        let s = aggregator().summarize(&window(300, 400, 200), date());
        assert_eq!(s.active_minutes, 1.0);
        assert_eq!(s.sedentary_minutes, 0.5);
        assert_eq!(s.activity_score, 66);
        assert_eq!(s.dominant_state, DominantState::Active);
    }

    #[test]
    fn score_is_floored_not_rounded() {
        // 2 / 3 = 66.67% -> 66
        assert_eq!(activity_score(1.0, 2.0), 66);
        // 0.999 / 1.0 -> 99, never rounded up to 100
        assert_eq!(activity_score(0.001, 0.999), 99);
    }

    #[test]
    fn empty_window_scores_zero() {
        let s = aggregator().summarize(&[], date());
        assert_eq!(s.activity_score, 0);
        assert_eq!(s.sedentary_minutes, 0.0);
        assert_eq!(s.active_minutes, 0.0);
        assert_eq!(s.dominant_state, DominantState::Sedentary);
    }

    #[test]
    fn score_stays_in_range() {
        for (sed, act) in [(0.0, 0.0), (0.0, 5.0), (5.0, 0.0), (1e-9, 1e9), (3.3, 7.7)] {
            assert!(activity_score(sed, act) <= 100, "sed={sed} act={act}");
        }
    }

    #[test]
    fn minutes_round_to_two_decimals() {
        let s = aggregator().summarize(&window(1, 0, 1000), date());
        assert_eq!(s.sedentary_minutes, 0.0);
        assert_eq!(s.active_minutes, 1.67);
        assert_eq!(s.activity_score, 100);
    }

    #[test]
    fn minutes_follow_exact_value_with_ties_to_even() {
        let a = aggregator();
        // 9/600 is stored just below 0.015
        assert_eq!(a.minutes(9), 0.01);
        // 27/600 is stored just below 0.045
        assert_eq!(a.minutes(27), 0.04);
        // 75/600 is exactly 0.125, a true tie
        assert_eq!(a.minutes(75), 0.12);
        assert_eq!(a.minutes(45), 0.07);
    }

    #[test]
    fn rounding_carries_into_the_score() {
        let counts = StateCounts { sedentary: 9, fidget: 0, active: 75 };
        let s = aggregator().summarize_counts(&counts, date());
        assert_eq!(s.sedentary_minutes, 0.01);
        assert_eq!(s.active_minutes, 0.12);
        assert_eq!(s.activity_score, 92);
        assert_eq!(s.dominant_state, DominantState::Active);
    }

    #[test]
    fn summarizing_twice_is_identical() {
        let states = window(123, 45, 678);
        assert_eq!(aggregator().summarize(&states, date()), aggregator().summarize(&states, date()));
    }
}
