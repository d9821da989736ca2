//! One-shot logger initialization for test processes.
//!
//! Built on `tracing-subscriber`: an `EnvFilter` in front of a fmt layer.
//! `RUST_LOG`, when set, takes precedence over the verbosity flag.

use std::io;
use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::flags::TestFlags;

/// Resolved logger settings, produced from [`TestFlags`] before
/// initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log at debug verbosity instead of info.
    pub verbose: bool,
    /// Write log output to standard error instead of standard output.
    pub log_to_stderr: bool,
}

/// Resolve logger settings for an e2e test process.
///
/// E2e output always mirrors to standard error so failures stay visible in
/// CI capture, overriding whatever `--alsologtostderr` value was supplied.
#[must_use]
pub fn stderr_log_config(flags: &TestFlags) -> LogConfig {
    LogConfig {
        verbose: flags.log_verbose,
        log_to_stderr: true,
    }
}

static INIT: Once = Once::new();

/// Install the global tracing subscriber for this test process.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `config.verbose` (`debug` vs `info`). Calling this more than once is a
/// no-op, and an already-installed subscriber from another harness in the
/// same process is left in place.
pub fn init_logger(config: &LogConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if config.verbose {
                EnvFilter::new("debug")
            } else {
                EnvFilter::new("info")
            }
        });

        let registry = tracing_subscriber::registry().with(filter);
        let result = if config.log_to_stderr {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .try_init()
        } else {
            registry.with(tracing_subscriber::fmt::layer()).try_init()
        };

        // Another subscriber may already be installed; keep it.
        let _ = result;
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_config_forces_stderr() {
        let flags = TestFlags {
            log_verbose: false,
            emit_metrics: false,
            also_log_to_stderr: false,
        };

        let config = stderr_log_config(&flags);
        assert!(
            config.log_to_stderr,
            "stderr mirroring must be on even when the flag is off"
        );
    }

    #[test]
    fn test_stderr_config_preserves_verbosity() {
        let quiet = stderr_log_config(&TestFlags::default());
        assert!(!quiet.verbose);

        let verbose = stderr_log_config(&TestFlags {
            log_verbose: true,
            ..TestFlags::default()
        });
        assert!(verbose.verbose);
    }

    #[test]
    fn test_init_logger_is_idempotent() {
        let config = LogConfig {
            verbose: true,
            log_to_stderr: true,
        };

        // Neither call may panic, whatever subscriber other tests installed.
        init_logger(&config);
        init_logger(&LogConfig {
            verbose: false,
            log_to_stderr: false,
        });
    }
}
