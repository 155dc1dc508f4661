//! Builds indicator snapshots from the macro and yield providers

use crate::error::BiasError;
use crate::models::{IndicatorSnapshot, InputOrigins, MacroReadings, SentimentFlag, YieldReading};
use crate::services::fallback::FallbackProvider;
use tracing::info;

/// Snapshot plus the context the engine does not score on
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledSnapshot {
    pub snapshot: IndicatorSnapshot,
    pub current_yield: f64,
    pub origins: InputOrigins,
}

pub struct SnapshotAssembler {
    macro_data: FallbackProvider<MacroReadings>,
    yield_data: FallbackProvider<YieldReading>,
}

impl SnapshotAssembler {
    pub fn new(
        macro_data: FallbackProvider<MacroReadings>,
        yield_data: FallbackProvider<YieldReading>,
    ) -> Self {
        Self {
            macro_data,
            yield_data,
        }
    }

    pub async fn assemble(&self, sentiment: SentimentFlag) -> Result<AssembledSnapshot, BiasError> {
        let (macro_data, yield_data) = tokio::join!(
            self.macro_data.fetch_or_fallback(),
            self.yield_data.fetch_or_fallback()
        );

        let readings = macro_data.value;
        let snapshot = IndicatorSnapshot::new(
            readings.policy_rate_a,
            readings.policy_rate_b,
            readings.inflation_a,
            readings.inflation_b,
            yield_data.value.yield_change,
            Some(sentiment),
        )?;

        info!(
            macro_provider = self.macro_data.name(),
            yield_provider = self.yield_data.name(),
            macro_fallback = macro_data.origin.is_fallback(),
            yield_fallback = yield_data.origin.is_fallback(),
            "Assembled indicator snapshot"
        );

        Ok(AssembledSnapshot {
            snapshot,
            current_yield: yield_data.value.current_yield,
            origins: InputOrigins {
                macro_data: macro_data.origin,
                yield_data: yield_data.origin,
            },
        })
    }
}
