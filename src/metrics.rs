use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // Pre-register counters so they appear even before the first increment.
    counter!("trades_logged_total").absolute(0);
    counter!("trades_updated_total").absolute(0);
    counter!("trades_recreated_total").absolute(0);
    counter!("trades_deleted_total").absolute(0);
    counter!("challenges_archived_total").absolute(0);
    counter!("coach_requests_total").absolute(0);
    counter!("coach_failures_total").absolute(0);

    // Pre-register gauges at zero.
    gauge!("journal_trades").set(0.0);
    gauge!("open_positions").set(0.0);

    handle
}
