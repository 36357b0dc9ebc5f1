//! Operations behind the command-line interface.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{info, warn};

use crate::analytics::AnalyticsReport;
use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::journal::TradeHistory;
use crate::risk::{CalculationResult, SUPPORTED_PAIRS, TradeInput};
use crate::telemetry;

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })
}

/// Load configuration and install the tracing subscriber.
///
/// Without an explicit path, `config.yaml` is used when present and the
/// built-in defaults otherwise.
pub fn start(config_path: Option<&str>) -> Result<Config> {
    let config = config::load_config_or_default(config_path)?;
    telemetry::init_tracing(&config.observability.logging)?;
    Ok(config)
}

/// Size one trade under the configured settings.
///
/// Pairs outside [`SUPPORTED_PAIRS`] are still sized, with a warning.
pub fn size(config: &Config, input: &TradeInput) -> Result<CalculationResult> {
    config.risk.validate()?;

    if !input.currency_pair.is_supported() {
        warn!(
            pair = %input.currency_pair,
            supported = ?SUPPORTED_PAIRS,
            "Sizing a pair outside the supported list"
        );
    }

    let result = config
        .calculator
        .to_calculator()
        .calculate(input, &config.risk);

    info!(
        pair = %input.currency_pair,
        side = %input.trade_type,
        status = %result.status,
        lot = %result.recommended_lot,
        "Sized trade"
    );
    Ok(result)
}

/// Read a `TradeInput` JSON document and size it.
pub fn size_file(config: &Config, path: &Path) -> Result<CalculationResult> {
    let input: TradeInput = serde_json::from_reader(open(path)?)?;
    size(config, &input)
}

/// Build a report for a history snapshot.
#[must_use]
pub fn analyze(config: &Config, history: &TradeHistory) -> AnalyticsReport {
    let report = AnalyticsReport::build_with(history.records(), &config.analytics.report_options());
    info!(
        records = history.len(),
        finished = report.summary.total_trades,
        net_profit = %report.summary.net_profit,
        "Analyzed trade history"
    );
    report
}

/// Read a history snapshot (JSON array of records) and build its report.
pub fn analyze_file(config: &Config, path: &Path) -> Result<AnalyticsReport> {
    let history = TradeHistory::from_reader(open(path)?)?;
    Ok(analyze(config, &history))
}
