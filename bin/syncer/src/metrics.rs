//! Prometheus metrics for the syncer.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Duration;

/// Metrics recorded per reduced event.
///
/// Descriptions are registered with the global registry on creation. Without
/// an installed exporter every call is a no-op.
#[derive(Debug, Clone)]
pub struct Metrics {
    _private: (),
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self::register_descriptions();
        Self { _private: () }
    }

    fn register_descriptions() {
        describe_counter!(
            "syncer_events_reduced_total",
            "Total events committed to the store by event kind"
        );
        describe_counter!(
            "syncer_events_failed_total",
            "Total events whose reduction failed by event kind"
        );
        describe_histogram!(
            "syncer_event_duration_seconds",
            "Duration of each event reduction in seconds"
        );
        describe_gauge!(
            "syncer_tracked_tokens",
            "Number of vault tokens in the current state"
        );
        describe_gauge!(
            "syncer_state_revision",
            "Number of committed state snapshots"
        );
    }

    /// Record one reduced event.
    pub fn record_event(&self, event: &'static str, committed: bool, duration: Duration) {
        histogram!("syncer_event_duration_seconds", "event" => event).record(duration.as_secs_f64());

        if committed {
            counter!("syncer_events_reduced_total", "event" => event).increment(1);
        } else {
            counter!("syncer_events_failed_total", "event" => event).increment(1);
        }
    }

    pub fn set_tracked_tokens(&self, count: usize) {
        gauge!("syncer_tracked_tokens").set(count as f64);
    }

    pub fn set_revision(&self, revision: u64) {
        gauge!("syncer_state_revision").set(revision as f64);
    }
}

/// Install the Prometheus metrics exporter and start the HTTP server.
///
/// Returns an error if the server fails to bind to the specified port.
pub fn install_prometheus_exporter(port: u16) -> eyre::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::net::SocketAddr;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| eyre::eyre!("Failed to install Prometheus exporter: {}", e))?;

    Ok(())
}
