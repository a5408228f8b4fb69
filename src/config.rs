use crate::error::{AppError, Result};

pub const DATABASE_URL: &str = "sqlite:activity.db";

/// Calibrated cutoff between SEDENTARY and FIDGET (acceleration delta magnitude).
pub const FIDGET_CUTOFF: f64 = 0.020;

/// Calibrated cutoff between FIDGET and ACTIVE.
pub const ACTIVE_CUTOFF: f64 = 0.040;

/// Sensor sampling rate used to turn sample counts into minutes (~10 Hz).
pub const SAMPLES_PER_MINUTE: f64 = 600.0;

/// Trailing window analysed by one run.
pub const WINDOW_HOURS: i64 = 24;

/// Clustering is skipped unless the window holds more samples than this.
pub const MIN_CLUSTER_SAMPLES: usize = 100;

/// k-means parameters for the adaptive threshold estimate.
pub mod kmeans {
    pub const CLUSTER_COUNT: usize = 3;
    pub const SEED: u64 = 42;
    /// Independent initialisations; the lowest-inertia run wins.
    pub const RESTARTS: usize = 10;
    pub const MAX_ITER: usize = 300;
    /// Convergence tolerance, scaled by the variance of the data.
    pub const TOL: f64 = 1e-4;
}

/// Two ordered cutoffs splitting acceleration into three states.
/// Loaded once per run and only ever passed by reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub fidget_cutoff: f64,
    pub active_cutoff: f64,
}

impl Thresholds {
    pub fn new(fidget_cutoff: f64, active_cutoff: f64) -> Result<Self> {
        if !fidget_cutoff.is_finite() || !active_cutoff.is_finite() {
            return Err(AppError::Config("cutoffs must be finite numbers".to_string()));
        }
        if fidget_cutoff >= active_cutoff {
            return Err(AppError::Config(format!(
                "FIDGET_CUTOFF ({fidget_cutoff}) must be below ACTIVE_CUTOFF ({active_cutoff})"
            )));
        }
        Ok(Self { fidget_cutoff, active_cutoff })
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            fidget_cutoff: FIDGET_CUTOFF,
            active_cutoff: ACTIVE_CUTOFF,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub log_level: String,
    /// FIDGET_CUTOFF / ACTIVE_CUTOFF, validated as a pair.
    pub thresholds: Thresholds,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let fidget_cutoff = parse_cutoff("FIDGET_CUTOFF", FIDGET_CUTOFF)?;
        let active_cutoff = parse_cutoff("ACTIVE_CUTOFF", ACTIVE_CUTOFF)?;

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DATABASE_URL.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            thresholds: Thresholds::new(fidget_cutoff, active_cutoff)?,
        })
    }
}

fn parse_cutoff(var: &str, default: f64) -> Result<f64> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::Config(format!("{var} must be a number, got {raw:?}"))),
        Err(_) => Ok(default),
    }
}
