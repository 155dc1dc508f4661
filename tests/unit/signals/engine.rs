//! Unit tests for the bias engine

use macrobias::models::{
    Banding, BiasLabel, Comparison, IndicatorSnapshot, Metric, RuleTable, SentimentFlag,
    ThresholdRule,
};
use macrobias::rules::presets;
use macrobias::signals::engine::{BiasEngine, DerivedMetrics};

fn snapshot(
    rate_a: f64,
    rate_b: f64,
    cpi_a: f64,
    cpi_b: f64,
    yield_change: f64,
    sentiment: SentimentFlag,
) -> IndicatorSnapshot {
    IndicatorSnapshot::new(rate_a, rate_b, cpi_a, cpi_b, yield_change, Some(sentiment))
        .expect("valid snapshot")
}

/// One sentiment rule per flag, each scoring `delta`
fn sentiment_table(delta: i32, banding: Banding) -> RuleTable {
    RuleTable::new(
        "test",
        vec![ThresholdRule::sentiment(
            SentimentFlag::HawkishB,
            delta,
            "tone {value}",
        )],
        banding,
    )
    .expect("valid table")
}

#[test]
fn derived_metrics_are_spreads() {
    let derived = DerivedMetrics::from_snapshot(&snapshot(
        5.5,
        4.0,
        3.4,
        2.9,
        -0.2,
        SentimentFlag::DovishA,
    ));
    assert!((derived.rate_spread - 1.5).abs() < 1e-12);
    assert!((derived.inflation_spread - 0.5).abs() < 1e-9);
    assert_eq!(derived.yield_delta, -0.2);
    assert_eq!(derived.sentiment, SentimentFlag::DovishA);
}

#[test]
fn evaluation_is_deterministic() {
    let table = presets::default_table().unwrap();
    let input = snapshot(5.5, 4.0, 3.4, 1.9, 0.3, SentimentFlag::HawkishA);

    let first = BiasEngine::evaluate(&input, &table);
    for _ in 0..10 {
        assert_eq!(BiasEngine::evaluate(&input, &table), first);
    }
}

#[test]
fn empty_table_scores_zero() {
    let table = RuleTable::empty();
    let result = BiasEngine::evaluate(
        &snapshot(9.0, 0.0, 8.0, 1.0, 1.0, SentimentFlag::HawkishA),
        &table,
    );
    assert_eq!(result.score, 0);
    assert_eq!(result.label, BiasLabel::Neutral);
    assert!(result.rationale.is_empty());
}

#[test]
fn first_matching_rule_wins_within_metric() {
    let table = presets::default_table().unwrap();
    // Spread 1.5 satisfies both "> 1.0" and "> 0.25"; only the first counts
    let result = BiasEngine::evaluate(
        &snapshot(5.5, 4.0, 3.0, 3.0, 0.0, SentimentFlag::Neutral),
        &table,
    );
    assert_eq!(result.score, -3);
    assert_eq!(result.rationale.len(), 1);
}

#[test]
fn rule_order_decides_the_match() {
    let rules = vec![
        ThresholdRule::above(Metric::RateSpread, 0.25, -1, "mild"),
        ThresholdRule::above(Metric::RateSpread, 1.0, -3, "strong"),
    ];
    let table = RuleTable::new("reversed", rules, Banding::five_band()).unwrap();
    let result = BiasEngine::evaluate(
        &snapshot(5.5, 4.0, 3.0, 3.0, 0.0, SentimentFlag::Neutral),
        &table,
    );
    assert_eq!(result.score, -1);
    assert_eq!(result.rationale, vec!["mild".to_string()]);
}

#[test]
fn contributions_across_metrics_are_additive() {
    let table = presets::default_table().unwrap();
    // rate -3, inflation -1, yield -1, FED hawkish -2
    let result = BiasEngine::evaluate(
        &snapshot(5.5, 4.0, 4.5, 2.0, 0.2, SentimentFlag::HawkishA),
        &table,
    );
    assert_eq!(result.score, -7);
    assert_eq!(result.label, BiasLabel::StrongSell);
    assert_eq!(result.rationale.len(), 4);
    assert!(result.rationale[0].starts_with("Rates:"));
    assert!(result.rationale[1].starts_with("Inflation:"));
    assert!(result.rationale[2].starts_with("Yields:"));
    assert!(result.rationale[3].starts_with("Sentiment:"));
}

#[test]
fn bullish_contributions_sum_to_strong_buy() {
    let table = presets::default_table().unwrap();
    // rate +3, inflation +1, yield +1, ECB hawkish +2
    let result = BiasEngine::evaluate(
        &snapshot(2.0, 4.0, 2.0, 3.5, -0.2, SentimentFlag::HawkishB),
        &table,
    );
    assert_eq!(result.score, 7);
    assert_eq!(result.label, BiasLabel::StrongBuy);
}

#[test]
fn five_band_boundaries() {
    let neutral = snapshot(4.0, 4.0, 3.0, 3.0, 0.0, SentimentFlag::HawkishB);
    let cases = [
        (-2, BiasLabel::StrongSell),
        (-1, BiasLabel::Sell),
        (0, BiasLabel::Neutral),
        (1, BiasLabel::Buy),
        (2, BiasLabel::StrongBuy),
    ];

    for (delta, expected) in cases {
        let result = BiasEngine::evaluate(&neutral, &sentiment_table(delta, Banding::five_band()));
        assert_eq!(result.score, delta);
        assert_eq!(result.label, expected, "score {}", delta);
    }
}

#[test]
fn three_band_has_no_strong_labels() {
    let neutral = snapshot(4.0, 4.0, 3.0, 3.0, 0.0, SentimentFlag::HawkishB);
    let cases = [
        (-5, BiasLabel::Sell),
        (0, BiasLabel::Neutral),
        (5, BiasLabel::Buy),
    ];

    for (delta, expected) in cases {
        let result = BiasEngine::evaluate(&neutral, &sentiment_table(delta, Banding::three_band()));
        assert_eq!(result.label, expected, "score {}", delta);
    }
}

#[test]
fn equal_comparison_uses_tolerance() {
    let rules = vec![ThresholdRule::numeric(
        Metric::InflationSpread,
        Comparison::Equal,
        0.5,
        1,
        "gap {value}",
    )];
    let table = RuleTable::new("equal", rules, Banding::five_band()).unwrap();
    // 3.4 - 2.9 is not exactly 0.5 in binary floating point
    let result = BiasEngine::evaluate(
        &snapshot(4.0, 4.0, 3.4, 2.9, 0.0, SentimentFlag::Neutral),
        &table,
    );
    assert_eq!(result.score, 1);
    assert_eq!(result.rationale, vec!["gap 0.50".to_string()]);
}

#[test]
fn sentiment_rationale_renders_display_name() {
    let neutral = snapshot(4.0, 4.0, 3.0, 3.0, 0.0, SentimentFlag::HawkishB);
    let result = BiasEngine::evaluate(&neutral, &sentiment_table(2, Banding::five_band()));
    assert_eq!(
        result.rationale,
        vec![format!("tone {}", SentimentFlag::HawkishB.display_name())]
    );
}

#[test]
fn opposite_deltas_offset_each_other() {
    let rules = vec![
        ThresholdRule::above(Metric::RateSpread, 1.0, -3, "spread {value}"),
        ThresholdRule::below(Metric::YieldDelta, -0.1, 2, "yields {value}"),
    ];
    let table = RuleTable::new("offset", rules, Banding::five_band()).unwrap();

    let result = BiasEngine::evaluate(
        &snapshot(5.5, 4.0, 3.0, 3.0, -0.2, SentimentFlag::Neutral),
        &table,
    );
    assert_eq!(result.score, -1);
    assert_eq!(result.label, BiasLabel::Sell);
    assert_eq!(
        result.rationale,
        vec!["spread 1.50".to_string(), "yields -0.20".to_string()]
    );
}
