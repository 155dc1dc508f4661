//! Evaluation context for dependency injection
//!
//! Bundles the rule table registry, the snapshot assembler and the optional
//! market data provider so the HTTP layer and the CLI share one code path.

use crate::config::Config;
use crate::error::{BiasError, ProviderError};
use crate::indicators::trend::TechnicalView;
use crate::metrics::Metrics;
use crate::models::{BiasReport, BiasResult, IndicatorSnapshot, PriceHistory, SentimentFlag};
use crate::rules::registry::RuleTableRegistry;
use crate::services::{
    CachedProvider, DataProvider, FallbackProvider, JsonFileProvider, MacroDataProvider,
    MarketDataProvider, Reading, SentimentDataProvider, SnapshotAssembler, StaticProvider,
};
use std::sync::Arc;
use tracing::{info, warn};

pub struct BiasContext {
    pub registry: Arc<RuleTableRegistry>,
    pub assembler: SnapshotAssembler,
    pub market_data: Option<Arc<MarketDataProvider>>,
    pub metrics: Option<Arc<Metrics>>,
    pub default_rule_table: String,
}

impl BiasContext {
    pub fn new(registry: Arc<RuleTableRegistry>, assembler: SnapshotAssembler) -> Self {
        Self {
            registry,
            assembler,
            market_data: None,
            metrics: None,
            default_rule_table: crate::rules::DEFAULT_RULE_TABLE.to_string(),
        }
    }

    /// Context serving the manually configured readings through the
    /// cache and fallback layers. A configured price history file backs
    /// the technical view.
    pub fn from_config(
        config: &Config,
        registry: Arc<RuleTableRegistry>,
        metrics: Option<Arc<Metrics>>,
    ) -> Self {
        let macro_source: Arc<MacroDataProvider> =
            Arc::new(StaticProvider::new("manual-macro", config.manual_macro));
        let yield_source: Arc<SentimentDataProvider> =
            Arc::new(StaticProvider::new("manual-yield", config.manual_yield));

        let macro_data = wrap(macro_source, config, config.fallback_macro, metrics.as_ref());
        let yield_data = wrap(yield_source, config, config.fallback_yield, metrics.as_ref());

        let mut context = Self::new(registry, SnapshotAssembler::new(macro_data, yield_data))
            .with_default_rule_table(config.rule_table.clone());
        context.metrics = metrics;

        if let Some(path) = &config.price_history_path {
            let file: Arc<MarketDataProvider> =
                Arc::new(JsonFileProvider::<PriceHistory>::new(path));
            let cached: Arc<MarketDataProvider> =
                Arc::new(CachedProvider::new(file, config.cache_ttl));
            context = context.with_market_data(cached);
        }

        context
    }

    pub fn with_market_data(mut self, provider: Arc<MarketDataProvider>) -> Self {
        self.market_data = Some(provider);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn with_default_rule_table(mut self, name: impl Into<String>) -> Self {
        self.default_rule_table = name.into();
        self
    }

    /// Score a caller-supplied snapshot
    pub fn evaluate(
        &self,
        snapshot: &IndicatorSnapshot,
        rule_table: Option<&str>,
    ) -> Result<BiasResult, BiasError> {
        let name = rule_table.unwrap_or(&self.default_rule_table);
        let result = self.registry.evaluate(snapshot, name)?;
        if let Some(metrics) = &self.metrics {
            metrics.record_evaluation(result.label.as_str());
        }
        Ok(result)
    }

    /// Assemble a snapshot from the providers, score it and attach the
    /// technical view when price history is available.
    pub async fn report(
        &self,
        sentiment: SentimentFlag,
        rule_table: Option<&str>,
    ) -> Result<BiasReport, BiasError> {
        let name = rule_table.unwrap_or(&self.default_rule_table).to_string();
        // Fail on an unknown table before touching any provider
        self.registry.get(&name)?;

        let assembled = self.assembler.assemble(sentiment).await?;
        let result = self.evaluate(&assembled.snapshot, Some(&name))?;

        info!(
            rule_table = %name,
            score = result.score,
            label = result.label.as_str(),
            "Bias report generated"
        );

        let mut report = BiasReport::new(name, assembled.snapshot, result)
            .with_current_yield(assembled.current_yield)
            .with_origins(assembled.origins);

        if let Some(technical) = self.technical_view().await {
            report = report.with_technical(technical);
        }

        Ok(report)
    }

    async fn technical_view(&self) -> Option<TechnicalView> {
        let provider = self.market_data.as_ref()?;
        let fetched: Result<PriceHistory, ProviderError> = provider.fetch().await;
        let history = fetched.and_then(|history| history.validate().map(|_| history));

        match history {
            Ok(history) => TechnicalView::from_history(&history),
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "Price history unavailable");
                None
            }
        }
    }
}

fn wrap<T: Reading>(
    source: Arc<dyn DataProvider<T>>,
    config: &Config,
    fallback: T,
    metrics: Option<&Arc<Metrics>>,
) -> FallbackProvider<T> {
    let cached: Arc<dyn DataProvider<T>> = Arc::new(CachedProvider::new(source, config.cache_ttl));
    let provider = FallbackProvider::new(cached, fallback, config.retry);
    match metrics {
        Some(metrics) => provider.with_metrics(metrics.clone()),
        None => provider,
    }
}
