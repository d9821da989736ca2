//! One-shot metrics-exporter initialization for test processes.

use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

static EXPORTER: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder for this test process.
///
/// Everything recorded afterwards carries an `exporter` label with the
/// given name, so scraped output identifies which harness produced it.
/// If a global recorder is already installed in this process, a standalone
/// recorder is built instead so metric recording still works. Repeated
/// calls return the handle from the first call.
pub fn init_exporter(exporter_name: &str) -> &'static PrometheusHandle {
    EXPORTER.get_or_init(|| {
        let builder = PrometheusBuilder::new().add_global_label("exporter", exporter_name);

        match builder.install_recorder() {
            Ok(handle) => {
                info!(exporter = exporter_name, "Prometheus metrics recorder installed");
                handle
            }
            Err(_) => {
                // A recorder is already registered in this process; record
                // into a standalone one instead of failing the run.
                PrometheusBuilder::new()
                    .add_global_label("exporter", exporter_name)
                    .build_recorder()
                    .handle()
            }
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_init_exporter_returns_one_handle() {
        let first = init_exporter("unit-metrics");
        let second = init_exporter("other-name");

        assert!(
            std::ptr::eq(first, second),
            "repeated initialization must reuse the first handle"
        );
    }

    #[test]
    fn test_recorded_metrics_carry_exporter_label() {
        let handle = init_exporter("unit-metrics");

        metrics::counter!("test_support_smoke_total").increment(1);

        let rendered = handle.render();
        assert!(
            rendered.contains("test_support_smoke_total"),
            "recorded counter should appear in rendered output: {rendered}"
        );
        assert!(
            rendered.contains("exporter=\"unit-metrics\""),
            "exporter label should appear in rendered output: {rendered}"
        );
    }
}
