//! Structured logging, OpenTelemetry export, and service counters.
//!
//! # Telemetry invariants
//!
//! - **No secrets, keys, tokens or member identifiers** in any span attribute,
//!   metric label, or log field.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   takes precedence when set.

pub mod init;
pub mod metrics;

pub use init::init_telemetry;
pub use metrics::Metrics;
