use tracing::{debug, info};

use crate::config::{Thresholds, MIN_CLUSTER_SAMPLES};
use crate::detector::kmeans::{self, KMeansConfig};

/// Advisory fidget cutoff derived from today's acceleration distribution.
/// Reported only; never written back into `Thresholds`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdSuggestion {
    /// Cluster centers, ascending.
    pub centers: [f64; 3],
    /// Midpoint of the two lowest centers.
    pub fidget_cutoff: f64,
    /// Cutoff in force for this run.
    pub configured_fidget_cutoff: f64,
}

impl ThresholdSuggestion {
    /// Signed distance of the suggestion from the configured cutoff.
    pub fn drift(&self) -> f64 {
        self.fidget_cutoff - self.configured_fidget_cutoff
    }
}

/// Re-estimates the fidget cutoff by 3-way clustering of the window.
pub struct ThresholdEstimator {
    kmeans: KMeansConfig,
    min_samples: usize,
}

impl Default for ThresholdEstimator {
    fn default() -> Self {
        Self {
            kmeans: KMeansConfig::default(),
            min_samples: MIN_CLUSTER_SAMPLES,
        }
    }
}

impl ThresholdEstimator {
    /// Returns `None` when the window holds `min_samples` or fewer values,
    /// or when clustering does not yield three distinct non-empty groups.
    pub fn suggest(&self, accelerations: &[f64], thresholds: &Thresholds) -> Option<ThresholdSuggestion> {
        if accelerations.len() <= self.min_samples {
            debug!(
                samples = accelerations.len(),
                "Skipping adaptive threshold: need more than {} samples",
                self.min_samples
            );
            return None;
        }

        let Some(fit) = kmeans::fit(accelerations, &self.kmeans) else {
            info!("Skipping adaptive threshold: data does not separate into 3 clusters");
            return None;
        };

        if fit.cluster_sizes.iter().any(|&size| size == 0) {
            info!(sizes = ?fit.cluster_sizes, "Skipping adaptive threshold: empty cluster");
            return None;
        }

        let mut centers = fit.centers;
        centers.sort_by(|a, b| a.total_cmp(b));
        let centers: [f64; 3] = match centers.as_slice() {
            &[lo, mid, hi] if lo < mid && mid < hi => [lo, mid, hi],
            _ => {
                info!(?centers, "Skipping adaptive threshold: cluster centers not distinct");
                return None;
            }
        };

        Some(ThresholdSuggestion {
            centers,
            fidget_cutoff: (centers[0] + centers[1]) / 2.0,
            configured_fidget_cutoff: thresholds.fidget_cutoff,
        })
    }
}
