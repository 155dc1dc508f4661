//! Point-in-time indicator snapshot consumed by the bias engine

use crate::error::BiasError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Central bank communication tone.
///
/// `A` is the base-rate currency of the spread metrics (USD in the built-in
/// tables), `B` is the other leg (EUR). Deserializes through [`FromStr`],
/// so `"HawkishA"` and `"hawkish_a"` are both accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SentimentFlag {
    #[default]
    Neutral,
    HawkishA,
    DovishA,
    HawkishB,
    DovishB,
}

impl SentimentFlag {
    pub fn display_name(&self) -> &'static str {
        match self {
            SentimentFlag::Neutral => "neutral",
            SentimentFlag::HawkishA => "hawkish (currency A)",
            SentimentFlag::DovishA => "dovish (currency A)",
            SentimentFlag::HawkishB => "hawkish (currency B)",
            SentimentFlag::DovishB => "dovish (currency B)",
        }
    }

    pub fn all() -> [SentimentFlag; 5] {
        [
            SentimentFlag::Neutral,
            SentimentFlag::HawkishA,
            SentimentFlag::DovishA,
            SentimentFlag::HawkishB,
            SentimentFlag::DovishB,
        ]
    }
}

impl fmt::Display for SentimentFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SentimentFlag {
    type Err = BiasError;

    /// Accepts `HawkishA`, `hawkish_a`, `hawkish-a` and the like.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "" | "neutral" => Ok(SentimentFlag::Neutral),
            "hawkisha" => Ok(SentimentFlag::HawkishA),
            "dovisha" => Ok(SentimentFlag::DovishA),
            "hawkishb" => Ok(SentimentFlag::HawkishB),
            "dovishb" => Ok(SentimentFlag::DovishB),
            _ => Err(BiasError::validation(
                "sentiment_flag",
                format!("unknown sentiment {:?}", s),
            )),
        }
    }
}

impl TryFrom<String> for SentimentFlag {
    type Error = BiasError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Unvalidated snapshot fields, as received over the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotInput {
    pub policy_rate_a: f64,
    pub policy_rate_b: f64,
    pub inflation_a: f64,
    pub inflation_b: f64,
    #[serde(default)]
    pub bond_yield_change: f64,
    #[serde(default)]
    pub sentiment_flag: Option<SentimentFlag>,
}

/// Validated indicator snapshot. All numeric fields are finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SnapshotInput")]
pub struct IndicatorSnapshot {
    policy_rate_a: f64,
    policy_rate_b: f64,
    inflation_a: f64,
    inflation_b: f64,
    bond_yield_change: f64,
    sentiment_flag: SentimentFlag,
}

impl IndicatorSnapshot {
    pub fn new(
        policy_rate_a: f64,
        policy_rate_b: f64,
        inflation_a: f64,
        inflation_b: f64,
        bond_yield_change: f64,
        sentiment_flag: Option<SentimentFlag>,
    ) -> Result<Self, BiasError> {
        ensure_finite("policy_rate_a", policy_rate_a)?;
        ensure_finite("policy_rate_b", policy_rate_b)?;
        ensure_finite("inflation_a", inflation_a)?;
        ensure_finite("inflation_b", inflation_b)?;
        ensure_finite("bond_yield_change", bond_yield_change)?;

        Ok(Self {
            policy_rate_a,
            policy_rate_b,
            inflation_a,
            inflation_b,
            bond_yield_change,
            sentiment_flag: sentiment_flag.unwrap_or_default(),
        })
    }

    pub fn policy_rate_a(&self) -> f64 {
        self.policy_rate_a
    }

    pub fn policy_rate_b(&self) -> f64 {
        self.policy_rate_b
    }

    pub fn inflation_a(&self) -> f64 {
        self.inflation_a
    }

    pub fn inflation_b(&self) -> f64 {
        self.inflation_b
    }

    pub fn bond_yield_change(&self) -> f64 {
        self.bond_yield_change
    }

    pub fn sentiment_flag(&self) -> SentimentFlag {
        self.sentiment_flag
    }
}

impl TryFrom<SnapshotInput> for IndicatorSnapshot {
    type Error = BiasError;

    fn try_from(input: SnapshotInput) -> Result<Self, Self::Error> {
        Self::new(
            input.policy_rate_a,
            input.policy_rate_b,
            input.inflation_a,
            input.inflation_b,
            input.bond_yield_change,
            input.sentiment_flag,
        )
    }
}

impl From<IndicatorSnapshot> for SnapshotInput {
    fn from(snapshot: IndicatorSnapshot) -> Self {
        Self {
            policy_rate_a: snapshot.policy_rate_a,
            policy_rate_b: snapshot.policy_rate_b,
            inflation_a: snapshot.inflation_a,
            inflation_b: snapshot.inflation_b,
            bond_yield_change: snapshot.bond_yield_change,
            sentiment_flag: Some(snapshot.sentiment_flag),
        }
    }
}

fn ensure_finite(field: &str, value: f64) -> Result<(), BiasError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BiasError::validation(
            field,
            format!("expected a finite number, got {}", value),
        ))
    }
}
