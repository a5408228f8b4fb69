mod analysis;
mod config;
mod db;
mod detector;
mod error;
mod scorer;
mod types;

use chrono::{Local, Utc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::analysis::{NightlyAnalysis, RunOutcome};
use crate::config::Config;
use crate::error::Result;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    info!(
        fidget_cutoff = cfg.thresholds.fidget_cutoff,
        active_cutoff = cfg.thresholds.active_cutoff,
        "Starting nightly activity analysis"
    );

    match run(&cfg).await {
        Ok(RunOutcome::NoData) => info!("Nothing to summarise"),
        Ok(RunOutcome::Saved { summary, suggestion }) => {
            if suggestion.is_none() {
                info!("No adaptive threshold suggestion for this window");
            }
            info!("Run complete for {}", summary.date);
        }
        Err(e) => {
            error!(kind = %e.kind(), "Analysis failed: {e}");
            std::process::exit(1);
        }
    }
}

/// The pool lives for exactly one run and is closed on every path.
async fn run(cfg: &Config) -> Result<RunOutcome> {
    let pool = db::connect(&cfg.database_url).await?;
    info!("Database ready at {}", cfg.database_url);

    let analysis = NightlyAnalysis::new(pool.clone(), cfg.thresholds);
    let outcome = analysis.run(Utc::now(), Local::now().date_naive()).await;

    pool.close().await;
    outcome
}
