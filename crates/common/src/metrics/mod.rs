//! Metrics and observability utilities
//!
//! Describes the ranking-run metrics and provides a helper to record them
//! through the `metrics` facade. Nothing is recorded unless a recorder
//! (e.g. the Prometheus exporter) is installed by the binary.

use metrics::{
    counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit,
};
use std::time::Instant;

/// Metrics prefix for all Spear metrics
pub const METRICS_PREFIX: &str = "spear";

/// Buckets for ranking run duration (in seconds)
pub const RUN_DURATION_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.010,  // 10ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.500,  // 500ms
    1.000,  // 1s
    5.000,  // 5s
    30.00,  // 30s
    120.0,  // 2m
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_ranking_runs_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of ranking runs"
    );

    describe_counter!(
        format!("{}_activities_processed_total", METRICS_PREFIX),
        Unit::Count,
        "Total activities fed into ranking runs"
    );

    describe_histogram!(
        format!("{}_ranking_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Ranking run latency in seconds"
    );

    describe_gauge!(
        format!("{}_users", METRICS_PREFIX),
        Unit::Count,
        "Distinct users in the last ranking run"
    );

    describe_gauge!(
        format!("{}_resources", METRICS_PREFIX),
        Unit::Count,
        "Distinct resources in the last ranking run"
    );

    describe_gauge!(
        format!("{}_edges", METRICS_PREFIX),
        Unit::Count,
        "Nonzero adjacency entries in the last ranking run"
    );

    tracing::debug!("Metrics registered");
}

/// Size of one ranking run, reported when it finishes
#[derive(Debug, Clone, Copy, Default)]
pub struct RunShape {
    pub activities: usize,
    pub users: usize,
    pub resources: usize,
    pub edges: usize,
}

/// Helper to record ranking run metrics
pub struct RankingRunMetrics {
    start: Instant,
    credit: &'static str,
}

impl RankingRunMetrics {
    /// Start tracking a run
    pub fn start(credit: &'static str) -> Self {
        Self {
            start: Instant::now(),
            credit,
        }
    }

    /// Seconds since the run started
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Record run completion
    pub fn finish(self, shape: RunShape, success: bool) {
        let duration = self.elapsed_secs();
        let status = if success { "success" } else { "error" };

        counter!(
            format!("{}_ranking_runs_total", METRICS_PREFIX),
            "credit" => self.credit,
            "status" => status
        )
        .increment(1);

        counter!(format!("{}_activities_processed_total", METRICS_PREFIX))
            .increment(shape.activities as u64);

        histogram!(
            format!("{}_ranking_duration_seconds", METRICS_PREFIX),
            "credit" => self.credit
        )
        .record(duration);

        if success {
            gauge!(format!("{}_users", METRICS_PREFIX)).set(shape.users as f64);
            gauge!(format!("{}_resources", METRICS_PREFIX)).set(shape.resources as f64);
            gauge!(format!("{}_edges", METRICS_PREFIX)).set(shape.edges as f64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_buckets() {
        let mut prev = 0.0;
        for &bucket in RUN_DURATION_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }
    }

    #[test]
    fn test_run_metrics() {
        register_metrics();
        let metrics = RankingRunMetrics::start("sqrt");
        metrics.finish(
            RunShape {
                activities: 7,
                users: 4,
                resources: 3,
                edges: 7,
            },
            true,
        );
        // Just verify it runs without a recorder installed
    }
}
