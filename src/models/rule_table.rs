//! Rule table data models

use crate::error::BiasError;
use crate::models::snapshot::SentimentFlag;
use serde::{Deserialize, Serialize};

/// Tolerance used by `Equal` / `NotEqual` comparisons
pub const EQUALITY_EPSILON: f64 = 0.0001;

/// Derived metric a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Metric {
    RateSpread,
    InflationSpread,
    YieldDelta,
    Sentiment,
}

impl Metric {
    /// Fixed order in which metrics are scored
    pub const EVALUATION_ORDER: [Metric; 4] = [
        Metric::RateSpread,
        Metric::InflationSpread,
        Metric::YieldDelta,
        Metric::Sentiment,
    ];

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Metric::Sentiment)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Metric::RateSpread => "Rate spread",
            Metric::InflationSpread => "Inflation spread",
            Metric::YieldDelta => "Yield delta",
            Metric::Sentiment => "Sentiment",
        }
    }
}

/// Comparison operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Comparison {
    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,
    Equal,
    NotEqual,
    SentimentIs,
}

impl Comparison {
    /// Compare a numeric value. `SentimentIs` never matches a number.
    pub fn compare(&self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::GreaterThan => value > threshold,
            Comparison::LessThan => value < threshold,
            Comparison::GreaterEqual => value >= threshold,
            Comparison::LessEqual => value <= threshold,
            Comparison::Equal => (value - threshold).abs() < EQUALITY_EPSILON,
            Comparison::NotEqual => (value - threshold).abs() >= EQUALITY_EPSILON,
            Comparison::SentimentIs => false,
        }
    }
}

/// One banded threshold rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub metric: Metric,
    pub comparison: Comparison,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentFlag>,
    pub score_delta: i32,
    pub rationale: String,
}

impl ThresholdRule {
    pub fn numeric(
        metric: Metric,
        comparison: Comparison,
        threshold: f64,
        score_delta: i32,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            metric,
            comparison,
            threshold: Some(threshold),
            sentiment: None,
            score_delta,
            rationale: rationale.into(),
        }
    }

    pub fn above(
        metric: Metric,
        threshold: f64,
        score_delta: i32,
        rationale: impl Into<String>,
    ) -> Self {
        Self::numeric(metric, Comparison::GreaterThan, threshold, score_delta, rationale)
    }

    pub fn below(
        metric: Metric,
        threshold: f64,
        score_delta: i32,
        rationale: impl Into<String>,
    ) -> Self {
        Self::numeric(metric, Comparison::LessThan, threshold, score_delta, rationale)
    }

    pub fn sentiment(
        flag: SentimentFlag,
        score_delta: i32,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            metric: Metric::Sentiment,
            comparison: Comparison::SentimentIs,
            threshold: None,
            sentiment: Some(flag),
            score_delta,
            rationale: rationale.into(),
        }
    }

    fn validate(&self, index: usize) -> Result<(), BiasError> {
        match (self.metric.is_numeric(), self.comparison) {
            (true, Comparison::SentimentIs) => Err(BiasError::invalid_table(format!(
                "rule {}: SentimentIs cannot apply to {:?}",
                index, self.metric
            ))),
            (true, _) => match self.threshold {
                Some(t) if t.is_finite() => Ok(()),
                Some(t) => Err(BiasError::invalid_table(format!(
                    "rule {}: threshold must be finite, got {}",
                    index, t
                ))),
                None => Err(BiasError::invalid_table(format!(
                    "rule {}: {:?} comparison requires a threshold",
                    index, self.comparison
                ))),
            },
            (false, Comparison::SentimentIs) if self.sentiment.is_some() => Ok(()),
            (false, Comparison::SentimentIs) => Err(BiasError::invalid_table(format!(
                "rule {}: SentimentIs requires a sentiment flag",
                index
            ))),
            (false, other) => Err(BiasError::invalid_table(format!(
                "rule {}: {:?} cannot apply to Sentiment",
                index, other
            ))),
        }
    }
}

/// Score thresholds for the strong labels. `None` disables the strong band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banding {
    pub strong_sell_at: Option<i32>,
    pub strong_buy_at: Option<i32>,
}

impl Banding {
    /// StrongSell / Sell / Neutral / Buy / StrongBuy at -2 and +2
    pub fn five_band() -> Self {
        Self {
            strong_sell_at: Some(-2),
            strong_buy_at: Some(2),
        }
    }

    /// Sell / Neutral / Buy only
    pub fn three_band() -> Self {
        Self {
            strong_sell_at: None,
            strong_buy_at: None,
        }
    }

    fn validate(&self) -> Result<(), BiasError> {
        if let Some(sell) = self.strong_sell_at {
            if sell >= 0 {
                return Err(BiasError::invalid_table(format!(
                    "strong_sell_at must be negative, got {}",
                    sell
                )));
            }
        }
        if let Some(buy) = self.strong_buy_at {
            if buy <= 0 {
                return Err(BiasError::invalid_table(format!(
                    "strong_buy_at must be positive, got {}",
                    buy
                )));
            }
        }
        Ok(())
    }
}

impl Default for Banding {
    fn default() -> Self {
        Self::five_band()
    }
}

/// Ordered, data-only set of threshold rules plus label banding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RuleTableConfig")]
pub struct RuleTable {
    description: String,
    rules: Vec<ThresholdRule>,
    banding: Banding,
}

/// Unvalidated rule table, as found in JSON files and request bodies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTableConfig {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rules: Vec<ThresholdRule>,
    #[serde(default)]
    pub banding: Banding,
}

impl RuleTable {
    pub fn new(
        description: impl Into<String>,
        rules: Vec<ThresholdRule>,
        banding: Banding,
    ) -> Result<Self, BiasError> {
        for (index, rule) in rules.iter().enumerate() {
            rule.validate(index)?;
        }
        banding.validate()?;

        Ok(Self {
            description: description.into(),
            rules,
            banding,
        })
    }

    /// Table with no rules; always scores zero
    pub fn empty() -> Self {
        Self {
            description: String::new(),
            rules: Vec::new(),
            banding: Banding::default(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn rules(&self) -> &[ThresholdRule] {
        &self.rules
    }

    pub fn banding(&self) -> Banding {
        self.banding
    }

    /// Rules for one metric, in table order
    pub fn rules_for(&self, metric: Metric) -> impl Iterator<Item = &ThresholdRule> {
        self.rules.iter().filter(move |rule| rule.metric == metric)
    }
}

impl TryFrom<RuleTableConfig> for RuleTable {
    type Error = BiasError;

    fn try_from(config: RuleTableConfig) -> Result<Self, Self::Error> {
        Self::new(config.description, config.rules, config.banding)
    }
}

impl From<RuleTable> for RuleTableConfig {
    fn from(table: RuleTable) -> Self {
        Self {
            description: table.description,
            rules: table.rules,
            banding: table.banding,
        }
    }
}
