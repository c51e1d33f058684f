//! # Injection Sample
//!
//! Runs every scenario from [`injection_sample::lifecycle`] once and logs the results.
//!
//! Set `RUST_LOG=trace` to watch each state change, and `INJECTION_ERROR_POLICY=panic` to
//! turn any contract violation into an immediate panic.

use injection_framework::tracing::setup_tracing;
use injection_framework::ErrorPolicy;
use injection_sample::lifecycle::{run_interface, run_nested, run_peer_objects, run_repeated_cycles};
use tracing::info;

fn main() -> Result<(), String> {
    setup_tracing();

    let policy = ErrorPolicy::install_from_env().map_err(|e| e.to_string())?;
    info!(%policy, "Starting injection sample");

    let report = run_peer_objects(15).map_err(|e| e.to_string())?;
    info!(
        observed = report.observed,
        thing2_calls = report.thing2_calls,
        "Peer objects done"
    );

    let values = run_nested(10, 3).map_err(|e| e.to_string())?;
    info!(?values, "Nested dependencies done");

    let values = run_interface(10, 3).map_err(|e| e.to_string())?;
    info!(?values, "Interface dependency done");

    let calls = run_repeated_cycles(15, 3).map_err(|e| e.to_string())?;
    info!(?calls, "Repeated cycles done");

    info!("Injection sample completed successfully");
    Ok(())
}
