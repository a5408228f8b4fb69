use crate::config::Thresholds;
use crate::error::{AppError, Result};
use crate::types::{ActivityState, Sample};

/// Classify one acceleration value against the two cutoffs.
/// Each bucket is closed on its upper edge, so a value exactly at a cutoff
/// lands in the lower state. Negative values are SEDENTARY.
/// Returns `None` for NaN.
pub fn classify(acceleration: f64, thresholds: &Thresholds) -> Option<ActivityState> {
    if acceleration.is_nan() {
        return None;
    }

    let state = if acceleration <= thresholds.fidget_cutoff {
        ActivityState::Sedentary
    } else if acceleration <= thresholds.active_cutoff {
        ActivityState::Fidget
    } else {
        ActivityState::Active
    };
    Some(state)
}

/// Classify every sample of a window, ignoring any stored label.
/// Fails on the first NaN reading.
pub fn classify_window(samples: &[Sample], thresholds: &Thresholds) -> Result<Vec<ActivityState>> {
    samples
        .iter()
        .enumerate()
        .map(|(index, s)| {
            classify(s.acceleration, thresholds).ok_or(AppError::InvalidSample {
                index,
                value: s.acceleration,
            })
        })
        .collect()
}

/// Number of samples whose stored label differs from the recomputed one.
/// Samples without a stored label are not counted.
pub fn count_label_mismatches(samples: &[Sample], states: &[ActivityState]) -> usize {
    samples
        .iter()
        .zip(states)
        .filter(|(s, computed)| s.state.is_some_and(|stored| stored != **computed))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn t() -> Thresholds {
        Thresholds::default()
    }

    fn sample(acceleration: f64, state: Option<ActivityState>) -> Sample {
        Sample { timestamp: Utc::now(), acceleration, state }
    }

    #[test]
    fn below_fidget_is_sedentary() {
        for a in [0.0, 0.005, 0.01, 0.0199] {
            assert_eq!(classify(a, &t()), Some(ActivityState::Sedentary), "a={a}");
        }
    }

    #[test]
    fn between_cutoffs_is_fidget() {
        for a in [0.0201, 0.03, 0.0399] {
            assert_eq!(classify(a, &t()), Some(ActivityState::Fidget), "a={a}");
        }
    }

    #[test]
    fn above_active_is_active() {
        for a in [0.0401, 0.05, 3.5] {
            assert_eq!(classify(a, &t()), Some(ActivityState::Active), "a={a}");
        }
    }

    #[test]
    fn boundaries_land_in_lower_bucket() {
        assert_eq!(classify(0.020, &t()), Some(ActivityState::Sedentary));
        assert_eq!(classify(0.040, &t()), Some(ActivityState::Fidget));
    }

    #[test]
    fn negative_is_sedentary_and_nan_is_rejected() {
        assert_eq!(classify(-1.0, &t()), Some(ActivityState::Sedentary));
        assert_eq!(classify(f64::NAN, &t()), None);
        assert_eq!(classify(f64::INFINITY, &t()), Some(ActivityState::Active));
    }

    #[test]
    fn window_fails_on_nan_with_index() {
        let samples = vec![sample(0.01, None), sample(f64::NAN, None), sample(0.05, None)];
        match classify_window(&samples, &t()) {
            Err(AppError::InvalidSample { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected InvalidSample, got {other:?}"),
        }
    }

    #[test]
    fn window_recomputes_and_audits_stored_labels() {
        let samples = vec![
            sample(0.01, Some(ActivityState::Sedentary)),
            sample(0.03, Some(ActivityState::Active)),
            sample(0.05, None),
        ];
        let states = classify_window(&samples, &t()).unwrap();
        assert_eq!(
            states,
            vec![ActivityState::Sedentary, ActivityState::Fidget, ActivityState::Active]
        );
        assert_eq!(count_label_mismatches(&samples, &states), 1);
    }
}
