mod bootstrap;

use std::io::Write;

use anyhow::{Context, Result};
use stats_core::settings::Settings;
use stats_data::analysis::analyze_deliveries;

fn main() {
    let settings = Settings::load();

    if let Err(err) = bootstrap::setup_logging(&settings.log_level) {
        eprintln!("failed to initialise logging: {err:#}");
        std::process::exit(1);
    }

    if let Err(err) = run(&settings) {
        tracing::error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(settings: &Settings) -> Result<()> {
    tracing::info!("recipe-stats v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::debug!("read config {}", settings.config.display());
    let config = settings
        .load_config()
        .with_context(|| format!("can't read config {}", settings.config.display()))?;

    tracing::debug!("read data from {}", config.path.display());
    let analysis = analyze_deliveries(&config).context("can't read data file")?;
    tracing::info!(
        "Processed {} records in {:.3}s",
        analysis.metadata.records_processed,
        analysis.metadata.load_time_seconds
    );

    tracing::debug!("make report");
    let json = if settings.pretty {
        analysis.report.to_json_pretty()
    } else {
        analysis.report.to_json()
    }
    .context("can't serialise report")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("can't write report")?;

    Ok(())
}
