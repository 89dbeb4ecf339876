//! Prometheus metrics for diagnostic-service.

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

/// Registry and collectors, published together so a racing second
/// initialisation can never split them.
pub struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    model_attempts_total: IntCounterVec,
    model_latency_seconds: HistogramVec,
}

pub static METRICS: OnceLock<Metrics> = OnceLock::new();

impl Metrics {
    fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new(
                "diagnostic_requests_total",
                "Total diagnostic requests by outcome",
            ),
            &["outcome"], // outcome: primary, fallback, failed
        )?;

        let model_attempts_total = IntCounterVec::new(
            Opts::new(
                "diagnostic_model_attempts_total",
                "Model calls by model and result",
            ),
            &["model", "outcome"],
        )?;

        let model_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "diagnostic_model_latency_seconds",
                "Model API latency in seconds",
            )
            .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
            &["model"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(model_attempts_total.clone()))?;
        registry.register(Box::new(model_latency_seconds.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            model_attempts_total,
            model_latency_seconds,
        })
    }
}

/// Initialize all metrics. Later calls are no-ops.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    if METRICS.get().is_some() {
        return Ok(());
    }

    let metrics = Metrics::new()?;
    if METRICS.set(metrics).is_ok() {
        tracing::info!("Prometheus metrics initialized");
    }
    Ok(())
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let metrics = match METRICS.get() {
        Some(m) => m,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    if let Err(e) = encoder.encode(&metrics.registry.gather(), &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
        format!("# Failed to convert metrics to UTF-8: {}\n", e)
    })
}

/// Record the outcome of one diagnostic request.
pub fn record_request(outcome: &str) {
    if let Some(m) = METRICS.get() {
        m.requests_total.with_label_values(&[outcome]).inc();
    }
}

/// Record one model call and how it ended.
pub fn record_model_attempt(model: &str, outcome: &str) {
    if let Some(m) = METRICS.get() {
        m.model_attempts_total
            .with_label_values(&[model, outcome])
            .inc();
    }
}

/// Record model call latency.
pub fn record_model_latency(model: &str, duration_secs: f64) {
    if let Some(m) = METRICS.get() {
        m.model_latency_seconds
            .with_label_values(&[model])
            .observe(duration_secs);
    }
}
