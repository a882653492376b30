// /////////////////////////////////////////////////////////////////////////////
// Mediaforge
// Copyright (c) 2026 Mediaforge Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Prometheus metrics for job and stage execution, registered into one
//! [`Registry`] an operator can expose over an HTTP scrape endpoint.

use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};

pub struct MetricsService {
    registry: Registry,
    pub jobs_started_total: IntCounter,
    pub jobs_completed_total: IntCounter,
    pub jobs_failed_total: IntCounter,
    pub stage_executions_total: IntCounterVec,
    pub stage_failures_total: IntCounterVec,
    pub cache_hits_total: IntCounterVec,
    pub cache_misses_total: IntCounterVec,
    pub stage_duration_seconds: Histogram,
}

impl MetricsService {
    pub fn new() -> Self {
        let registry = Registry::new();

        let jobs_started_total = IntCounter::with_opts(
            Opts::new("jobs_started_total", "Total number of jobs started").namespace("mediaforge"),
        )
        .expect("valid metric options");

        let jobs_completed_total = IntCounter::with_opts(
            Opts::new("jobs_completed_total", "Total number of jobs that completed successfully").namespace("mediaforge"),
        )
        .expect("valid metric options");

        let jobs_failed_total = IntCounter::with_opts(
            Opts::new("jobs_failed_total", "Total number of jobs that failed").namespace("mediaforge"),
        )
        .expect("valid metric options");

        let stage_executions_total = IntCounterVec::new(
            Opts::new("stage_executions_total", "Total stage executions, by stage name").namespace("mediaforge"),
            &["stage"],
        )
        .expect("valid metric options");

        let stage_failures_total = IntCounterVec::new(
            Opts::new("stage_failures_total", "Total stage failures, by stage name").namespace("mediaforge"),
            &["stage"],
        )
        .expect("valid metric options");

        let cache_hits_total = IntCounterVec::new(
            Opts::new("cache_hits_total", "Total cache hits, by stage name").namespace("mediaforge"),
            &["stage"],
        )
        .expect("valid metric options");

        let cache_misses_total = IntCounterVec::new(
            Opts::new("cache_misses_total", "Total cache misses, by stage name").namespace("mediaforge"),
            &["stage"],
        )
        .expect("valid metric options");

        let stage_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("stage_duration_seconds", "Stage execution duration in seconds")
                .namespace("mediaforge")
                .buckets(vec![0.5, 1.0, 5.0, 15.0, 30.0, 60.0, 300.0, 900.0, 1800.0]),
        )
        .expect("valid histogram options");

        registry.register(Box::new(jobs_started_total.clone())).expect("unique metric name");
        registry.register(Box::new(jobs_completed_total.clone())).expect("unique metric name");
        registry.register(Box::new(jobs_failed_total.clone())).expect("unique metric name");
        registry.register(Box::new(stage_executions_total.clone())).expect("unique metric name");
        registry.register(Box::new(stage_failures_total.clone())).expect("unique metric name");
        registry.register(Box::new(cache_hits_total.clone())).expect("unique metric name");
        registry.register(Box::new(cache_misses_total.clone())).expect("unique metric name");
        registry.register(Box::new(stage_duration_seconds.clone())).expect("unique metric name");

        Self {
            registry,
            jobs_started_total,
            jobs_completed_total,
            jobs_failed_total,
            stage_executions_total,
            stage_failures_total,
            cache_hits_total,
            cache_misses_total,
            stage_duration_seconds,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Renders the current state of every registered metric in the
    /// Prometheus text exposition format.
    pub fn render(&self) -> String {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&families, &mut buffer).expect("prometheus families always encode");
        String::from_utf8(buffer).expect("prometheus text output is valid utf-8")
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_registered_metric_names() {
        let metrics = MetricsService::new();
        metrics.jobs_started_total.inc();
        metrics.stage_executions_total.with_label_values(&["asr"]).inc();

        let rendered = metrics.render();
        assert!(rendered.contains("mediaforge_jobs_started_total"));
        assert!(rendered.contains("mediaforge_stage_executions_total"));
    }
}
