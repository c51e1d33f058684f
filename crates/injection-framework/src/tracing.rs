//! # Observability & Tracing
//!
//! Every wrapper logs its own lifecycle with structured fields. The short component type
//! name travels as the `component` field, so log lines stay readable without module paths.
//!
//! | Level | What |
//! |-------|------|
//! | `error` | Contract violations (always, whichever [`ErrorPolicy`](crate::ErrorPolicy) is active) |
//! | `info` | `Initialized` / `Shutdown` transitions, policy installation |
//! | `debug` | Dependencies bound (with a `rebind` flag) |
//! | `trace` | Raw state changes, skipped shutdowns |
//!
//! ```bash
//! RUST_LOG=info cargo run -p injection-sample
//! RUST_LOG=injection_framework=trace cargo run -p injection-sample
//! ```
//!
//! With `RUST_LOG=debug` the peer-objects scenario reads:
//!
//! ```text
//! DEBUG Dependencies bound component="Cog" rebind=false
//! DEBUG Dependencies bound component="Widget" rebind=false
//!  INFO Initialized component="Cog"
//!  INFO Initialized component="Widget"
//!  INFO Shutdown component="Widget"
//!  INFO Shutdown component="Cog"
//! ```

/// Initializes the tracing subscriber for a binary.
///
/// Filtering comes from the `RUST_LOG` environment variable. The compact format hides the
/// module path (`with_target(false)`); the `component` field already says where a line
/// comes from.
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("Application started");
/// ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
