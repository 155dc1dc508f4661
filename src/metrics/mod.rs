//! Prometheus metrics for the HTTP layer, bias evaluations and provider fallbacks

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub bias_evaluations_total: IntCounterVec,
    pub provider_fallbacks_total: IntCounterVec,
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
        let bias_evaluations_total = IntCounterVec::new(
            Opts::new("bias_evaluations_total", "Bias evaluations by resulting label"),
            &["label"],
        )?;
        let provider_fallbacks_total = IntCounterVec::new(
            Opts::new(
                "provider_fallbacks_total",
                "Times a provider failed and fallback values were used",
            ),
            &["provider"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(bias_evaluations_total.clone()))?;
        registry.register(Box::new(provider_fallbacks_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            bias_evaluations_total,
            provider_fallbacks_total,
        })
    }

    pub fn record_evaluation(&self, label: &str) {
        self.bias_evaluations_total.with_label_values(&[label]).inc();
    }

    pub fn record_fallback(&self, provider: &str) {
        self.provider_fallbacks_total
            .with_label_values(&[provider])
            .inc();
    }

    /// Render all metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
