//! Prometheus metrics shared by the API server and the monitor.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    /// Labelled by `kind` (stock / index).
    pub signal_evaluations_total: IntCounterVec,
    pub signal_evaluation_failures_total: IntCounterVec,
    pub signal_evaluation_duration_seconds: Histogram,
    /// Labelled by `outcome` (ok / error).
    pub notifications_sent_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let signal_evaluations_total = IntCounterVec::new(
            Opts::new(
                "signal_evaluations_total",
                "Completed signal evaluations",
            ),
            &["kind"],
        )?;
        let signal_evaluation_failures_total = IntCounterVec::new(
            Opts::new(
                "signal_evaluation_failures_total",
                "Signal evaluations that ended in an error",
            ),
            &["kind"],
        )?;
        let signal_evaluation_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "signal_evaluation_duration_seconds",
                "Time spent fetching and evaluating one symbol",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;
        let notifications_sent_total = IntCounterVec::new(
            Opts::new("notifications_sent_total", "Notification dispatches"),
            &["outcome"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(signal_evaluations_total.clone()))?;
        registry.register(Box::new(signal_evaluation_failures_total.clone()))?;
        registry.register(Box::new(signal_evaluation_duration_seconds.clone()))?;
        registry.register(Box::new(notifications_sent_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            signal_evaluations_total,
            signal_evaluation_failures_total,
            signal_evaluation_duration_seconds,
            notifications_sent_total,
        })
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
