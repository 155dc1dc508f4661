//! Reference scenarios against the built-in rule tables

use macrobias::models::{BiasLabel, IndicatorSnapshot, SentimentFlag};
use macrobias::rules::presets::{
    self, AGGREGATOR_SCRAPE, ENCYCLOPEDIA_SCRAPE, MANUAL_ENTRY,
};
use macrobias::{evaluate, evaluate_default, BiasError, RuleTableRegistry};

fn snapshot(
    rate_a: f64,
    rate_b: f64,
    cpi_a: f64,
    cpi_b: f64,
    yield_change: f64,
    sentiment: Option<SentimentFlag>,
) -> IndicatorSnapshot {
    IndicatorSnapshot::new(rate_a, rate_b, cpi_a, cpi_b, yield_change, sentiment)
        .expect("valid snapshot")
}

#[test]
fn rate_gap_alone_is_strong_sell() {
    // FED 5.50 vs ECB 4.00, CPI gap 0.5 below the 1.0 cutoff, flat yields
    let result = evaluate_default(&snapshot(5.50, 4.00, 3.4, 2.9, 0.0, None)).unwrap();

    assert_eq!(result.score, -3);
    assert_eq!(result.label, BiasLabel::StrongSell);
    assert_eq!(
        result.rationale,
        vec![
            "Rates: FED 5.50% vs ECB 4.00% (spread 1.50), strong pull of capital towards the dollar"
                .to_string()
        ]
    );
}

#[test]
fn balanced_inputs_are_neutral() {
    let result = evaluate_default(&snapshot(4.0, 4.0, 2.5, 2.5, 0.0, None)).unwrap();

    assert_eq!(result.score, 0);
    assert_eq!(result.label, BiasLabel::Neutral);
    assert!(result.rationale.is_empty());
}

#[test]
fn missing_table_is_not_found() {
    let result = evaluate(&snapshot(4.0, 4.0, 2.5, 2.5, 0.0, None), "missing");
    assert_eq!(result, Err(BiasError::NotFound("missing".to_string())));
}

#[test]
fn builtin_tables_are_valid() {
    for (name, table) in presets::builtin_tables() {
        assert!(table.is_ok(), "built-in table {} failed validation", name);
    }
}

#[test]
fn manual_entry_scores_every_rate_spread() {
    let registry = RuleTableRegistry::with_builtins();

    // Equal rates fall into the "less or equal" branch
    let equal = registry
        .evaluate(&snapshot(4.0, 4.0, 2.5, 2.5, 0.0, None), MANUAL_ENTRY)
        .unwrap();
    assert_eq!(equal.score, 1);
    assert_eq!(equal.label, BiasLabel::Buy);

    let small_gap = registry
        .evaluate(&snapshot(4.5, 4.0, 2.5, 2.5, 0.0, None), MANUAL_ENTRY)
        .unwrap();
    assert_eq!(small_gap.score, -1);
    assert_eq!(small_gap.label, BiasLabel::Sell);
}

#[test]
fn manual_entry_uses_three_bands() {
    let registry = RuleTableRegistry::with_builtins();
    // rate -3, ECB dovish -2
    let result = registry
        .evaluate(
            &snapshot(5.5, 4.0, 3.4, 2.9, 0.0, Some(SentimentFlag::DovishB)),
            MANUAL_ENTRY,
        )
        .unwrap();
    assert_eq!(result.score, -5);
    assert_eq!(result.label, BiasLabel::Sell);
}

#[test]
fn manual_entry_ignores_yields() {
    let registry = RuleTableRegistry::with_builtins();
    let flat = registry
        .evaluate(&snapshot(4.5, 4.0, 2.5, 2.5, 0.0, None), MANUAL_ENTRY)
        .unwrap();
    let rising = registry
        .evaluate(&snapshot(4.5, 4.0, 2.5, 2.5, 0.5, None), MANUAL_ENTRY)
        .unwrap();
    assert_eq!(flat, rising);
}

#[test]
fn encyclopedia_scrape_half_point_cutoffs() {
    let registry = RuleTableRegistry::with_builtins();
    // rate 1.5 > 0.5 → -2, CPI gap 0.4 is inside the band
    let result = registry
        .evaluate(&snapshot(5.5, 4.0, 3.3, 2.9, 0.0, None), ENCYCLOPEDIA_SCRAPE)
        .unwrap();
    assert_eq!(result.score, -2);
    assert_eq!(result.label, BiasLabel::Sell);

    // rate -0.75 → +2, CPI -0.75 → +1
    let euro = registry
        .evaluate(&snapshot(3.25, 4.0, 2.0, 2.75, 0.0, None), ENCYCLOPEDIA_SCRAPE)
        .unwrap();
    assert_eq!(euro.score, 3);
    assert_eq!(euro.label, BiasLabel::Buy);
}

#[test]
fn aggregator_scrape_counts_yield_momentum() {
    let registry = RuleTableRegistry::with_builtins();
    // rate 0.5 > 0.25 → -2, yield +0.08 > 0.05 → -1
    let result = registry
        .evaluate(&snapshot(4.5, 4.0, 3.0, 3.0, 0.08, None), AGGREGATOR_SCRAPE)
        .unwrap();
    assert_eq!(result.score, -3);
    assert_eq!(result.label, BiasLabel::StrongSell);
    assert_eq!(result.rationale.len(), 2);
    assert!(result.rationale[1].contains("0.08"));
}
