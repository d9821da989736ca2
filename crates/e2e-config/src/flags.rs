//! Command-line flags and environment-derived defaults for e2e test runs.
//!
//! Configuration is parsed from the command line with an environment
//! fallback for the docker repo, then exposed as a process-wide read-only
//! value. Parsing also runs the one-time logging and metrics
//! initialization for the test process.

use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::sync::OnceLock;

use clap::{ArgAction, Parser};
use thiserror::Error;
use tracing::info;

use test_support::flags::TestFlags;
use test_support::logging::{self, stderr_log_config};
use test_support::metrics;

use crate::E2E_METRICS_EXPORTER;

/// Environment variable consulted when `--dockerrepo` is not given.
pub const KO_DOCKER_REPO_VAR: &str = "KO_DOCKER_REPO";

/// Default version tag for test images.
pub const DEFAULT_TAG: &str = "latest";

/// Raw command line of an e2e test binary.
#[derive(Debug, Parser)]
#[command(name = "e2e-tests", about = "End-to-end test environment settings")]
struct Args {
    /// Set if the domain suffix configured on the cluster's route
    /// controller resolves to the test cluster.
    #[arg(
        long = "resolvabledomain",
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    resolvable_domain: bool,

    /// URI of the docker repo the test images were uploaded to.
    /// Defaults to $KO_DOCKER_REPO.
    #[arg(long = "dockerrepo")]
    docker_repo: Option<String>,

    /// Version tag for the test images.
    #[arg(long = "tag", default_value = DEFAULT_TAG)]
    tag: String,

    #[command(flatten)]
    test: TestFlags,
}

/// Environment settings for the e2e tests in this process.
///
/// Immutable after initialization and safe for unsynchronized concurrent
/// reads; see [`EnvironmentConfig::global`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// Whether hostnames issued for test routes resolve externally.
    pub resolvable_domain: bool,
    /// Registry URI holding the test images.
    pub docker_repo: String,
    /// Version tag applied to test images.
    pub tag: String,
}

/// E2e configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The command line could not be parsed.
    #[error("invalid command-line configuration: {0}")]
    InvalidFlags(#[from] clap::Error),
}

static GLOBAL: OnceLock<EnvironmentConfig> = OnceLock::new();

impl EnvironmentConfig {
    /// Parse e2e environment settings and run the one-time logging and
    /// metrics initialization.
    ///
    /// `args` is the full command line, binary name first. `vars` is the
    /// process environment, injectable for tests. Log output always
    /// mirrors to standard error, whatever `--alsologtostderr` value was
    /// supplied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFlags`] when the command line holds a
    /// malformed value or an unknown flag. No partial configuration is
    /// produced.
    pub fn init<I, T>(args: I, vars: &HashMap<String, String>) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let parsed = Args::try_parse_from(args)?;

        let docker_repo = match parsed.docker_repo {
            Some(repo) => repo,
            None => vars.get(KO_DOCKER_REPO_VAR).cloned().unwrap_or_default(),
        };

        logging::init_logger(&stderr_log_config(&parsed.test));

        if parsed.test.emit_metrics {
            metrics::init_exporter(E2E_METRICS_EXPORTER);
        }

        let config = EnvironmentConfig {
            resolvable_domain: parsed.resolvable_domain,
            docker_repo,
            tag: parsed.tag,
        };

        info!(
            resolvable_domain = config.resolvable_domain,
            docker_repo = %config.docker_repo,
            tag = %config.tag,
            "E2e environment configured"
        );

        Ok(config)
    }

    /// Initialize the process-wide configuration, or return the existing
    /// one.
    ///
    /// The first successful call wins; later calls return the stored value
    /// without re-parsing or repeating side effects.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFlags`] when no configuration exists
    /// yet and the command line does not parse.
    pub fn init_global<I, T>(
        args: I,
        vars: &HashMap<String, String>,
    ) -> Result<&'static Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        if let Some(config) = GLOBAL.get() {
            return Ok(config);
        }

        let config = Self::init(args, vars)?;
        Ok(GLOBAL.get_or_init(|| config))
    }

    /// Process-wide configuration built from the real command line and
    /// environment.
    ///
    /// For e2e test binaries (built with `harness = false`) that own their
    /// command line. An invalid command line is fatal: usage goes to
    /// standard error and the process exits with a non-zero status, since
    /// tests must not run under an ambiguous configuration.
    pub fn global() -> &'static Self {
        match Self::init_global(env::args(), &env::vars().collect()) {
            Ok(config) => config,
            Err(ConfigError::InvalidFlags(err)) => err.exit(),
        }
    }

    /// Full path of a test image in the configured repo, as
    /// `repo/name:tag`.
    #[must_use]
    pub fn image_path(&self, name: &str) -> String {
        format!("{}/{}:{}", self.docker_repo, name, self.tag)
    }
}
