use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid acceleration {value} at sample {index}")]
    InvalidSample { index: usize, value: f64 },

    #[error("Computation error: {0}")]
    Computation(String),
}

/// Coarse grouping used when reporting a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Store unreachable, query or write failed.
    Connectivity,
    Configuration,
    /// Bad sample data or a numeric failure in the pipeline.
    Computation,
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FaultKind::Connectivity => "connectivity",
            FaultKind::Configuration => "configuration",
            FaultKind::Computation => "computation",
        };
        write!(f, "{s}")
    }
}

impl AppError {
    pub fn kind(&self) -> FaultKind {
        match self {
            AppError::Database(_) | AppError::Migration(_) => FaultKind::Connectivity,
            AppError::Config(_) => FaultKind::Configuration,
            AppError::InvalidSample { .. } | AppError::Computation(_) => FaultKind::Computation,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
