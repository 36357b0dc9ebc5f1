//! Startup wiring: configuration load followed by subscriber installation.
//!
//! Kept in its own test binary because the tracing subscriber is
//! process-global.

#![allow(clippy::unwrap_used)]

use std::fs;

use entry_risk_checker::commands;
use entry_risk_checker::telemetry::TelemetryError;
use entry_risk_checker::Error;

#[test]
fn start_installs_the_subscriber_only_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(
        &path,
        "observability:\n  logging:\n    level: warn\n    format: json\n",
    )
    .unwrap();
    let path = path.to_str().unwrap();

    let config = commands::start(Some(path)).unwrap();
    assert_eq!(config.observability.logging.format, "json");

    let again = commands::start(Some(path));
    assert!(matches!(
        again,
        Err(Error::Telemetry(TelemetryError::Init(_)))
    ));
}
