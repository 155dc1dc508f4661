//! Built-in rule tables
//!
//! Currency A is USD (FED, US CPI, US long yield), currency B is EUR (ECB,
//! EU CPI). Negative deltas favour the dollar, i.e. selling EUR/USD.

use crate::error::BiasError;
use crate::models::{Banding, Comparison, Metric, RuleTable, SentimentFlag, ThresholdRule};

pub const MANUAL_ENTRY: &str = "manual-entry";
pub const ENCYCLOPEDIA_SCRAPE: &str = "encyclopedia-scrape";
pub const AGGREGATOR_SCRAPE: &str = "aggregator-scrape";

/// All built-in tables, keyed by registry name
pub fn builtin_tables() -> Vec<(&'static str, Result<RuleTable, BiasError>)> {
    vec![
        (super::registry::DEFAULT_RULE_TABLE, default_table()),
        (MANUAL_ENTRY, manual_entry_table()),
        (ENCYCLOPEDIA_SCRAPE, encyclopedia_scrape_table()),
        (AGGREGATOR_SCRAPE, aggregator_scrape_table()),
    ]
}

/// Five-band table: rate cutoffs at 0.25 / 1.0, inflation at 1.0, yield at 0.10.
pub fn default_table() -> Result<RuleTable, BiasError> {
    let mut rules = vec![
        ThresholdRule::above(
            Metric::RateSpread,
            1.0,
            -3,
            "Rates: FED {a}% vs ECB {b}% (spread {value}), strong pull of capital towards the dollar",
        ),
        ThresholdRule::above(
            Metric::RateSpread,
            0.25,
            -1,
            "Rates: FED {a}% vs ECB {b}% (spread {value}), mild dollar advantage",
        ),
        ThresholdRule::below(
            Metric::RateSpread,
            -1.0,
            3,
            "Rates: ECB {b}% vs FED {a}% (spread {value}), strong pull of capital towards the euro",
        ),
        ThresholdRule::below(
            Metric::RateSpread,
            -0.25,
            1,
            "Rates: ECB {b}% vs FED {a}% (spread {value}), mild euro advantage",
        ),
    ];
    rules.extend(inflation_rules(1.0));
    rules.extend(yield_rules(0.10));
    rules.extend(sentiment_rules());

    RuleTable::new(
        "Five-band macro bias: rates, inflation, long yields and central bank tone",
        rules,
        Banding::five_band(),
    )
}

/// Manually entered inputs; every rate spread scores, three-band labels.
pub fn manual_entry_table() -> Result<RuleTable, BiasError> {
    let mut rules = vec![
        ThresholdRule::above(
            Metric::RateSpread,
            1.0,
            -3,
            "Rates: FED {a}% vs ECB {b}% (spread {value}), strong dollar advantage",
        ),
        ThresholdRule::above(
            Metric::RateSpread,
            0.0,
            -1,
            "Rates: the US pays more ({a}%) than Europe ({b}%), capital flows to the dollar",
        ),
        ThresholdRule::below(
            Metric::RateSpread,
            -1.0,
            3,
            "Rates: ECB {b}% vs FED {a}% (spread {value}), strong euro advantage",
        ),
        ThresholdRule::numeric(
            Metric::RateSpread,
            Comparison::LessEqual,
            0.0,
            1,
            "Rates: Europe pays at least as much ({b}%) as the US ({a}%), euro advantage",
        ),
    ];
    rules.extend(inflation_rules(1.0));
    rules.extend(sentiment_rules());

    RuleTable::new(
        "Manually entered rates, CPI and tone; three-band labels",
        rules,
        Banding::three_band(),
    )
}

/// Rates and CPI read from an encyclopedia table; 0.5 cutoffs, three-band labels.
pub fn encyclopedia_scrape_table() -> Result<RuleTable, BiasError> {
    let mut rules = vec![
        ThresholdRule::above(
            Metric::RateSpread,
            0.5,
            -2,
            "Rates: FED {a}% vs ECB {b}% (spread {value}), dollar advantage",
        ),
        ThresholdRule::below(
            Metric::RateSpread,
            -0.5,
            2,
            "Rates: ECB {b}% vs FED {a}% (spread {value}), euro advantage",
        ),
    ];
    rules.extend(inflation_rules(0.5));
    rules.extend(sentiment_rules());

    RuleTable::new(
        "Scraped central bank rates and CPI; 0.5 cutoffs, three-band labels",
        rules,
        Banding::three_band(),
    )
}

/// Market-data aggregator inputs with yield momentum; 0.25 cutoffs.
pub fn aggregator_scrape_table() -> Result<RuleTable, BiasError> {
    let mut rules = vec![
        ThresholdRule::above(
            Metric::RateSpread,
            0.25,
            -2,
            "Rates: FED {a}% vs ECB {b}% (spread {value}), dollar advantage",
        ),
        ThresholdRule::below(
            Metric::RateSpread,
            -0.25,
            2,
            "Rates: ECB {b}% vs FED {a}% (spread {value}), euro advantage",
        ),
    ];
    rules.extend(inflation_rules(1.0));
    rules.extend(yield_rules(0.05));
    rules.extend(sentiment_rules());

    RuleTable::new(
        "Aggregator rates, CPI and US 10Y momentum; 0.25 cutoffs, five-band labels",
        rules,
        Banding::five_band(),
    )
}

fn inflation_rules(cutoff: f64) -> Vec<ThresholdRule> {
    vec![
        ThresholdRule::above(
            Metric::InflationSpread,
            cutoff,
            -1,
            "Inflation: US CPI {a}% above EU CPI {b}% (gap {value}), pressure on the FED to stay tight",
        ),
        ThresholdRule::below(
            Metric::InflationSpread,
            -cutoff,
            1,
            "Inflation: EU CPI {b}% above US CPI {a}% (gap {value}), pressure on the ECB to stay tight",
        ),
    ]
}

fn yield_rules(cutoff: f64) -> Vec<ThresholdRule> {
    vec![
        ThresholdRule::above(
            Metric::YieldDelta,
            cutoff,
            -1,
            "Yields: US long yield up {value} pts, supports the dollar",
        ),
        ThresholdRule::below(
            Metric::YieldDelta,
            -cutoff,
            1,
            "Yields: US long yield down {value} pts, weighs on the dollar",
        ),
    ]
}

fn sentiment_rules() -> Vec<ThresholdRule> {
    vec![
        ThresholdRule::sentiment(
            SentimentFlag::HawkishA,
            -2,
            "Sentiment: FED hawkish, higher-for-longer supports the dollar",
        ),
        ThresholdRule::sentiment(
            SentimentFlag::DovishA,
            2,
            "Sentiment: FED dovish, expected cuts weaken the dollar",
        ),
        ThresholdRule::sentiment(
            SentimentFlag::HawkishB,
            2,
            "Sentiment: ECB hawkish, tighter policy supports the euro",
        ),
        ThresholdRule::sentiment(
            SentimentFlag::DovishB,
            -2,
            "Sentiment: ECB dovish, expected cuts weaken the euro",
        ),
    ]
}
