//! Driver Churn Predictor - Main Entry Point
//!
//! Loads the trained artifacts, then runs a synchronous prompt -> predict
//! -> report loop over stdin until input ends.

use anyhow::Result;
use driver_churn_predictor::{
    config::{AppConfig, LoggingConfig},
    form::DriverForm,
    models::inference::PredictionEngine,
    report,
};
use std::io::{self, BufRead, Write};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load configuration before logging so the filter can honor it;
    // a missing file falls back to compiled defaults
    let (config, config_err) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(&config.logging);

    if let Some(e) = config_err {
        warn!(error = %e, "Could not read config file, using built-in defaults");
    }

    info!("Starting driver churn predictor");

    let engine = PredictionEngine::new(&config)?;
    info!(
        "Prediction engine ready ({} features, attribution {})",
        engine.feature_count(),
        if engine.has_explainer() {
            "available"
        } else {
            "unavailable"
        }
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    run_session(&engine, &mut input, &mut out)?;

    info!("Session finished");
    Ok(())
}

/// Initialize tracing; RUST_LOG overrides the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("driver_churn_predictor={}", logging.level))
    });

    if logging.format == "json" {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Prompt for records and report predictions until EOF or "exit".
fn run_session<R: BufRead, W: Write>(
    engine: &PredictionEngine,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    loop {
        writeln!(out)?;
        writeln!(
            out,
            "Enter driver info (Enter accepts the default, 'exit' quits):"
        )?;

        let record = match DriverForm::read_record(input, out)? {
            Some(record) => record,
            None => break,
        };

        match engine.predict(&record) {
            Ok(outcome) => {
                info!(
                    label = %outcome.prediction.label,
                    probability = outcome.prediction.probability,
                    attribution_rows = outcome.attributions.as_ref().map_or(0, |rows| rows.len()),
                    "Prediction complete"
                );
                report::render(out, &outcome)?;
            }
            Err(e) => {
                error!(error = %e, "Prediction failed");
                writeln!(out, "Prediction failed: {:#}", e)?;
            }
        }
    }

    Ok(())
}
