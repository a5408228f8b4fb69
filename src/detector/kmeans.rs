//! Seeded one-dimensional k-means (Lloyd iterations, k-means++ seeding).
//!
//! All restarts draw from a single ChaCha stream seeded once, so a given
//! input always produces the same partition.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::kmeans;

#[derive(Debug, Clone)]
pub struct KMeansConfig {
    pub k: usize,
    pub seed: u64,
    pub restarts: usize,
    pub max_iter: usize,
    /// Relative tolerance; multiplied by the data variance.
    pub tol: f64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: kmeans::CLUSTER_COUNT,
            seed: kmeans::SEED,
            restarts: kmeans::RESTARTS,
            max_iter: kmeans::MAX_ITER,
            tol: kmeans::TOL,
        }
    }
}

/// Result of the best (lowest inertia) restart.
#[derive(Debug, Clone)]
pub struct KMeansFit {
    /// Centers in cluster-index order (not sorted).
    pub centers: Vec<f64>,
    pub cluster_sizes: Vec<usize>,
    /// Sum of squared distances to the assigned center.
    pub inertia: f64,
}

impl KMeansFit {
    fn has_empty_cluster(&self) -> bool {
        self.cluster_sizes.iter().any(|&s| s == 0)
    }

    /// A fit with every cluster populated beats one with an empty cluster;
    /// otherwise lower inertia wins.
    fn beats(&self, other: &KMeansFit) -> bool {
        match (self.has_empty_cluster(), other.has_empty_cluster()) {
            (false, true) => true,
            (true, false) => false,
            _ => self.inertia < other.inertia,
        }
    }
}

/// Partition `values` into `config.k` clusters.
///
/// Returns `None` when no partition into k seeded clusters exists: fewer
/// values than k, a non-finite value, or fewer than k distinct values.
pub fn fit(values: &[f64], config: &KMeansConfig) -> Option<KMeansFit> {
    let k = config.k;
    if k == 0 || values.len() < k || values.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let tol = config.tol * variance(values);
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut best: Option<KMeansFit> = None;

    for _ in 0..config.restarts.max(1) {
        let init = init_plus_plus(values, k, &mut rng)?;
        let candidate = lloyd(values, init, config.max_iter, tol);
        if best.as_ref().map_or(true, |b| candidate.beats(b)) {
            best = Some(candidate);
        }
    }

    best
}

/// k-means++: first center uniform, the rest weighted by squared distance
/// to the nearest chosen center.
fn init_plus_plus(values: &[f64], k: usize, rng: &mut ChaCha8Rng) -> Option<Vec<f64>> {
    let n = values.len();
    let mut centers = Vec::with_capacity(k);
    centers.push(values[rng.gen_range(0..n)]);

    let mut dist_sq: Vec<f64> = values.iter().map(|v| (v - centers[0]).powi(2)).collect();

    while centers.len() < k {
        let total: f64 = dist_sq.iter().sum();
        if total <= 0.0 {
            // every remaining value coincides with a chosen center
            return None;
        }

        let target = rng.gen::<f64>() * total;
        let mut cumsum = 0.0;
        let mut next = None;
        for (i, &d) in dist_sq.iter().enumerate() {
            if d <= 0.0 {
                continue;
            }
            cumsum += d;
            next = Some(i);
            if cumsum >= target {
                break;
            }
        }
        let center = values[next?];
        centers.push(center);

        for (d, v) in dist_sq.iter_mut().zip(values) {
            let to_new = (v - center).powi(2);
            if to_new < *d {
                *d = to_new;
            }
        }
    }

    Some(centers)
}

fn lloyd(values: &[f64], mut centers: Vec<f64>, max_iter: usize, tol: f64) -> KMeansFit {
    let k = centers.len();
    let mut labels = vec![0usize; values.len()];

    for _ in 0..max_iter {
        assign(values, &centers, &mut labels);

        let mut sums = vec![0.0; k];
        let mut counts = vec![0usize; k];
        for (v, &c) in values.iter().zip(&labels) {
            sums[c] += v;
            counts[c] += 1;
        }

        let empty: Vec<usize> = (0..k).filter(|&c| counts[c] == 0).collect();
        let relocated = farthest_points(values, &centers, &labels, empty.len());

        let mut shift = 0.0;
        for c in 0..k {
            if counts[c] > 0 {
                let updated = sums[c] / counts[c] as f64;
                shift += (updated - centers[c]).powi(2);
                centers[c] = updated;
            }
        }

        // empty clusters restart on the points worst served by their center
        for (&c, &i) in empty.iter().zip(&relocated) {
            shift += (values[i] - centers[c]).powi(2);
            centers[c] = values[i];
        }

        if shift <= tol {
            break;
        }
    }

    assign(values, &centers, &mut labels);

    let mut cluster_sizes = vec![0usize; k];
    let mut inertia = 0.0;
    for (v, &c) in values.iter().zip(&labels) {
        cluster_sizes[c] += 1;
        inertia += (v - centers[c]).powi(2);
    }

    KMeansFit { centers, cluster_sizes, inertia }
}

/// Nearest center per value; ties go to the lower cluster index.
fn assign(values: &[f64], centers: &[f64], labels: &mut [usize]) {
    for (label, v) in labels.iter_mut().zip(values) {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (c, center) in centers.iter().enumerate() {
            let d = (v - center).powi(2);
            if d < best_dist {
                best_dist = d;
                best = c;
            }
        }
        *label = best;
    }
}

/// Indices of the `count` values farthest from their assigned center,
/// farthest first.
fn farthest_points(values: &[f64], centers: &[f64], labels: &[usize], count: usize) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }
    let mut order: Vec<(usize, f64)> = values
        .iter()
        .zip(labels)
        .enumerate()
        .map(|(i, (v, &c))| (i, (v - centers[c]).powi(2)))
        .collect();
    order.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    order.into_iter().take(count).map(|(i, _)| i).collect()
}

fn variance(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}
