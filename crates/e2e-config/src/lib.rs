//! Environment configuration for end-to-end tests.
//!
//! E2e tests exercise a live serving cluster rather than mocked
//! dependencies, so each test binary needs to know which namespace to
//! deploy into, whether hostnames issued for test routes resolve
//! externally, and which registry and tag to pull test images from. This
//! crate parses those settings once per process, runs the one-time logging
//! and metrics initialization, and exposes the result as read-only
//! configuration for the rest of the run.

#![warn(clippy::pedantic)]

/// Module for e2e flag parsing and the process-wide configuration
pub mod flags;

pub use flags::{ConfigError, EnvironmentConfig};

/// Namespace e2e tests deploy test services into.
pub const TEST_NAMESPACE: &str = "serving-tests";

/// Exporter name attached to metrics emitted by e2e tests.
pub const E2E_METRICS_EXPORTER: &str = "e2e-metrics";
