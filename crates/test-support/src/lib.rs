//! Shared support for test binaries.
//!
//! Every test binary that runs against a live cluster carries the same
//! process-wide settings: how verbose to log, whether to emit metrics, and
//! whether log output mirrors to standard error. This crate owns those
//! settings and the one-shot logger and metrics-exporter initialization
//! that consumes them.

#![warn(clippy::pedantic)]

/// Module for shared test-process flags
pub mod flags;

/// Module for logger initialization
pub mod logging;

/// Module for metrics-exporter initialization
pub mod metrics;
