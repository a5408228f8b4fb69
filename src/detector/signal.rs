//! Signal-quality diagnostics over the window's acceleration series.
//!
//! Hjorth parameters describe the series in the time domain:
//! - activity:   variance of the signal
//! - mobility:   sqrt(var(d1) / var(signal))
//! - complexity: mobility(d1) / mobility(signal)
//!
//! These are logged alongside the daily summary and never affect the score.

/// Segments compared by the stationarity check.
pub const STATIONARITY_SEGMENTS: usize = 16;

/// Variance-of-segment-variances above this marks the series non-stationary.
pub const STATIONARITY_LIMIT: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct SignalFeatures {
    pub mean: f64,
    pub variance: f64,
    pub stationary: bool,
    pub hjorth_activity: f64,
    pub hjorth_mobility: f64,
    pub hjorth_complexity: f64,
}

/// Needs at least three points (two differences). Undefined ratios
/// (flat signal) are reported as 0.
pub fn features(data: &[f64]) -> Option<SignalFeatures> {
    if data.len() < 3 {
        return None;
    }

    let (mean, variance) = mean_variance(data);
    let d1 = diff(data);
    let d2 = diff(&d1);
    let (_, var1) = mean_variance(&d1);
    let (_, var2) = mean_variance(&d2);

    let mobility = (var1 / variance).sqrt();
    let complexity = (var2 / var1).sqrt() / mobility;

    Some(SignalFeatures {
        mean,
        variance,
        stationary: is_stationary(data, STATIONARITY_SEGMENTS),
        hjorth_activity: variance,
        hjorth_mobility: finite_or_zero(mobility),
        hjorth_complexity: finite_or_zero(complexity),
    })
}

/// Splits the series into roughly `segments` chunks and checks that their
/// variances agree. Too-short series are reported as non-stationary.
pub fn is_stationary(data: &[f64], segments: usize) -> bool {
    if segments == 0 || data.len() < segments {
        return false;
    }

    let chunk_size = data.len() / segments;
    let variances: Vec<f64> = data
        .chunks(chunk_size)
        .map(|chunk| mean_variance(chunk).1)
        .collect();

    let (_, var_of_vars) = mean_variance(&variances);
    var_of_vars < STATIONARITY_LIMIT
}

fn mean_variance(data: &[f64]) -> (f64, f64) {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, variance)
}

fn diff(data: &[f64]) -> Vec<f64> {
    data.windows(2).map(|w| w[1] - w[0]).collect()
}

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}
