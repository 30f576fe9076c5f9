//! File-to-report pipeline.
//!
//! Opens the configured data file, streams it through a
//! [`ReportAggregator`] and returns the compiled [`Report`] together with a
//! little metadata about the run.

use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use stats_core::error::{Result, StatsError};
use stats_core::report::Report;
use stats_core::settings::Config;
use tracing::debug;

use crate::aggregator::ReportAggregator;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the report.
#[derive(Debug, Clone)]
pub struct AnalysisMetadata {
    /// Number of records read from the data file.
    pub records_processed: u64,
    /// Wall-clock seconds spent reading and aggregating.
    pub load_time_seconds: f64,
}

/// The complete output of [`analyze_deliveries`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub report: Report,
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline for `config`.
///
/// 1. Open the data file named by `config.path`.
/// 2. Stream every record into a [`ReportAggregator`].
/// 3. Compile the report.
///
/// Fails without a report if the file cannot be opened or any record is
/// malformed.
pub fn analyze_deliveries(config: &Config) -> Result<AnalysisResult> {
    let file = File::open(&config.path).map_err(|source| StatsError::FileRead {
        path: config.path.clone(),
        source,
    })?;
    debug!(path = %config.path.display(), "reading deliveries");

    let start = Instant::now();
    let (report, records_processed) =
        ReportAggregator::run(config.filter.clone(), BufReader::new(file))?;
    let load_time_seconds = start.elapsed().as_secs_f64();

    debug!(
        "Aggregated {} records in {:.3}s",
        records_processed, load_time_seconds
    );

    Ok(AnalysisResult {
        report,
        metadata: AnalysisMetadata {
            records_processed,
            load_time_seconds,
        },
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
