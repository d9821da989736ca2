//! Process-wide flags shared by every test binary.

use clap::{ArgAction, Args};

/// Settings common to all test binaries in this repository.
///
/// Declared as a clap [`Args`] group so suite-specific parsers can flatten
/// it next to their own flags. All three flags accept either the bare form
/// (`--logverbose`) or an explicit value (`--logverbose=false`).
#[derive(Debug, Clone, Default, Args)]
pub struct TestFlags {
    /// Log at debug verbosity instead of info.
    #[arg(
        long = "logverbose",
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub log_verbose: bool,

    /// Emit metrics from the test process.
    #[arg(
        long = "emitmetrics",
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub emit_metrics: bool,

    /// Mirror log output to standard error. E2e initialization turns this
    /// on unconditionally; see `logging::stderr_log_config`.
    #[arg(
        long = "alsologtostderr",
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub also_log_to_stderr: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::Parser;

    /// Minimal parser standing in for a consuming test binary.
    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        flags: TestFlags,
    }

    #[test]
    fn test_defaults_are_all_off() {
        let harness = Harness::try_parse_from(["harness"]).expect("empty command line parses");

        assert!(!harness.flags.log_verbose);
        assert!(!harness.flags.emit_metrics);
        assert!(!harness.flags.also_log_to_stderr);
    }

    #[test]
    fn test_bare_flag_means_true() {
        let harness = Harness::try_parse_from(["harness", "--logverbose", "--emitmetrics"])
            .expect("bare flags parse");

        assert!(harness.flags.log_verbose);
        assert!(harness.flags.emit_metrics);
        assert!(!harness.flags.also_log_to_stderr);
    }

    #[test]
    fn test_explicit_values_parse() {
        let harness = Harness::try_parse_from([
            "harness",
            "--logverbose=false",
            "--alsologtostderr=true",
        ])
        .expect("explicit bool values parse");

        assert!(!harness.flags.log_verbose);
        assert!(harness.flags.also_log_to_stderr);
    }

    #[test]
    fn test_non_bool_value_is_rejected() {
        let result = Harness::try_parse_from(["harness", "--emitmetrics=sometimes"]);
        assert!(result.is_err());
    }
}
