pub mod classifier;
pub mod kmeans;
pub mod signal;
pub mod threshold;

pub use threshold::{ThresholdEstimator, ThresholdSuggestion};
