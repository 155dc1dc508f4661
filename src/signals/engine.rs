//! Bias engine: scores an indicator snapshot against a rule table.

use crate::models::{
    BiasLabel, BiasResult, Comparison, IndicatorSnapshot, Metric, RuleTable, SentimentFlag,
    ThresholdRule,
};
use crate::signals::rationale::{self, RenderValue};

/// Metrics derived from a snapshot before rules are applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub rate_spread: f64,
    pub inflation_spread: f64,
    pub yield_delta: f64,
    pub sentiment: SentimentFlag,
    policy_rates: (f64, f64),
    inflation: (f64, f64),
}

impl DerivedMetrics {
    pub fn from_snapshot(snapshot: &IndicatorSnapshot) -> Self {
        Self {
            rate_spread: snapshot.policy_rate_a() - snapshot.policy_rate_b(),
            inflation_spread: snapshot.inflation_a() - snapshot.inflation_b(),
            yield_delta: snapshot.bond_yield_change(),
            sentiment: snapshot.sentiment_flag(),
            policy_rates: (snapshot.policy_rate_a(), snapshot.policy_rate_b()),
            inflation: (snapshot.inflation_a(), snapshot.inflation_b()),
        }
    }

    fn render_value(&self, metric: Metric) -> RenderValue {
        match metric {
            Metric::RateSpread => RenderValue::Numeric {
                value: self.rate_spread,
                a: Some(self.policy_rates.0),
                b: Some(self.policy_rates.1),
            },
            Metric::InflationSpread => RenderValue::Numeric {
                value: self.inflation_spread,
                a: Some(self.inflation.0),
                b: Some(self.inflation.1),
            },
            Metric::YieldDelta => RenderValue::Numeric {
                value: self.yield_delta,
                a: None,
                b: None,
            },
            Metric::Sentiment => RenderValue::Sentiment(self.sentiment),
        }
    }

    fn matches(&self, rule: &ThresholdRule) -> bool {
        match (rule.metric, rule.comparison) {
            (Metric::Sentiment, Comparison::SentimentIs) => rule.sentiment == Some(self.sentiment),
            (Metric::Sentiment, _) | (_, Comparison::SentimentIs) => false,
            (metric, comparison) => {
                let value = match metric {
                    Metric::RateSpread => self.rate_spread,
                    Metric::InflationSpread => self.inflation_spread,
                    _ => self.yield_delta,
                };
                rule.threshold
                    .is_some_and(|threshold| comparison.compare(value, threshold))
            }
        }
    }
}

pub struct BiasEngine;

impl BiasEngine {
    /// Score a snapshot. Within a metric the first matching rule wins;
    /// contributions across metrics are summed.
    pub fn evaluate(snapshot: &IndicatorSnapshot, table: &RuleTable) -> BiasResult {
        let derived = DerivedMetrics::from_snapshot(snapshot);
        let mut score = 0;
        let mut rationale = Vec::new();

        for metric in Metric::EVALUATION_ORDER {
            let matched = table
                .rules_for(metric)
                .find(|rule| derived.matches(rule));

            if let Some(rule) = matched {
                score += rule.score_delta;
                rationale.push(rationale::render(
                    &rule.rationale,
                    &derived.render_value(metric),
                ));
            }
        }

        BiasResult {
            score,
            label: BiasLabel::from_score(score, table.banding()),
            rationale,
        }
    }
}
