//! Unit tests for snapshot assembly from providers

use macrobias::models::{DataOrigin, MacroReadings, SentimentFlag, YieldReading};
use macrobias::services::{
    FallbackProvider, RetryPolicy, SnapshotAssembler, StaticProvider, UnavailableProvider,
};
use std::sync::Arc;

fn assembler(
    macro_live: Option<MacroReadings>,
    yield_live: Option<YieldReading>,
) -> SnapshotAssembler {
    let macro_data = match macro_live {
        Some(value) => FallbackProvider::new(
            Arc::new(StaticProvider::new("macro", value)),
            MacroReadings::default(),
            RetryPolicy::none(),
        ),
        None => FallbackProvider::new(
            Arc::new(UnavailableProvider::new("macro")),
            MacroReadings::default(),
            RetryPolicy::none(),
        ),
    };
    let yield_data = match yield_live {
        Some(value) => FallbackProvider::new(
            Arc::new(StaticProvider::new("yield", value)),
            YieldReading::default(),
            RetryPolicy::none(),
        ),
        None => FallbackProvider::new(
            Arc::new(UnavailableProvider::new("yield")),
            YieldReading::default(),
            RetryPolicy::none(),
        ),
    };
    SnapshotAssembler::new(macro_data, yield_data)
}

#[tokio::test]
async fn assembles_live_readings() {
    let assembler = assembler(
        Some(MacroReadings::new(5.25, 4.0, 3.0, 2.5)),
        Some(YieldReading::new(4.3, 0.12)),
    );

    let assembled = assembler.assemble(SentimentFlag::DovishA).await.unwrap();
    let snapshot = &assembled.snapshot;

    assert_eq!(snapshot.policy_rate_a(), 5.25);
    assert_eq!(snapshot.policy_rate_b(), 4.0);
    assert_eq!(snapshot.inflation_a(), 3.0);
    assert_eq!(snapshot.inflation_b(), 2.5);
    assert_eq!(snapshot.bond_yield_change(), 0.12);
    assert_eq!(snapshot.sentiment_flag(), SentimentFlag::DovishA);
    assert_eq!(assembled.current_yield, 4.3);
    assert_eq!(assembled.origins.macro_data, DataOrigin::Live);
    assert_eq!(assembled.origins.yield_data, DataOrigin::Live);
}

#[tokio::test]
async fn unavailable_sources_use_documented_fallbacks() {
    let assembler = assembler(None, None);

    let assembled = assembler.assemble(SentimentFlag::Neutral).await.unwrap();
    let snapshot = &assembled.snapshot;

    assert_eq!(snapshot.policy_rate_a(), 5.50);
    assert_eq!(snapshot.policy_rate_b(), 4.00);
    assert_eq!(snapshot.inflation_a(), 3.4);
    assert_eq!(snapshot.inflation_b(), 2.9);
    assert_eq!(snapshot.bond_yield_change(), 0.0);
    assert_eq!(assembled.current_yield, 4.00);
    assert!(assembled.origins.macro_data.is_fallback());
    assert!(assembled.origins.yield_data.is_fallback());
}

#[tokio::test]
async fn sources_fall_back_independently() {
    let assembler = assembler(Some(MacroReadings::new(3.0, 4.0, 2.0, 2.0)), None);

    let assembled = assembler.assemble(SentimentFlag::Neutral).await.unwrap();

    assert_eq!(assembled.snapshot.policy_rate_a(), 3.0);
    assert_eq!(assembled.origins.macro_data, DataOrigin::Live);
    assert!(assembled.origins.yield_data.is_fallback());
}
