//! Bias evaluation output models

use crate::indicators::trend::TechnicalView;
use crate::models::rule_table::Banding;
use crate::models::snapshot::IndicatorSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directional label derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiasLabel {
    StrongSell,
    Sell,
    Neutral,
    Buy,
    StrongBuy,
}

impl BiasLabel {
    pub fn from_score(score: i32, banding: Banding) -> Self {
        if banding.strong_sell_at.is_some_and(|t| score <= t) {
            BiasLabel::StrongSell
        } else if score < 0 {
            BiasLabel::Sell
        } else if banding.strong_buy_at.is_some_and(|t| score >= t) {
            BiasLabel::StrongBuy
        } else if score > 0 {
            BiasLabel::Buy
        } else {
            BiasLabel::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BiasLabel::StrongSell => "strong_sell",
            BiasLabel::Sell => "sell",
            BiasLabel::Neutral => "neutral",
            BiasLabel::Buy => "buy",
            BiasLabel::StrongBuy => "strong_buy",
        }
    }
}

/// Engine output: score, label and the rationale of every matched rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiasResult {
    pub score: i32,
    pub label: BiasLabel,
    pub rationale: Vec<String>,
}

/// What to look for on the chart given the fundamental bias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradingFocus {
    Short,
    Long,
    Caution,
}

impl TradingFocus {
    pub fn from_label(label: BiasLabel) -> Self {
        match label {
            BiasLabel::StrongSell | BiasLabel::Sell => TradingFocus::Short,
            BiasLabel::StrongBuy | BiasLabel::Buy => TradingFocus::Long,
            BiasLabel::Neutral => TradingFocus::Caution,
        }
    }

    pub fn guidance(&self) -> &'static str {
        match self {
            TradingFocus::Short => {
                "Fundamentals favour currency A. Look for resistances or support breaks; avoid buying dips."
            }
            TradingFocus::Long => {
                "Fundamentals favour currency B. Look to buy pullbacks."
            }
            TradingFocus::Caution => {
                "No clear direction. Scalp only or wait for the next macro release."
            }
        }
    }
}

/// Where an input value came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataOrigin {
    Live,
    Fallback { reason: String },
}

impl DataOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataOrigin::Fallback { .. })
    }
}

/// Origins of the inputs that went into a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputOrigins {
    pub macro_data: DataOrigin,
    pub yield_data: DataOrigin,
}

/// Full evaluation report handed to presenters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiasReport {
    pub rule_table: String,
    pub snapshot: IndicatorSnapshot,
    pub result: BiasResult,
    pub focus: TradingFocus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_yield: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical: Option<TechnicalView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origins: Option<InputOrigins>,
    pub generated_at: DateTime<Utc>,
}

impl BiasReport {
    pub fn new(rule_table: impl Into<String>, snapshot: IndicatorSnapshot, result: BiasResult) -> Self {
        let focus = TradingFocus::from_label(result.label);
        Self {
            rule_table: rule_table.into(),
            snapshot,
            result,
            focus,
            current_yield: None,
            technical: None,
            origins: None,
            generated_at: Utc::now(),
        }
    }

    pub fn with_technical(mut self, technical: TechnicalView) -> Self {
        self.technical = Some(technical);
        self
    }

    pub fn with_origins(mut self, origins: InputOrigins) -> Self {
        self.origins = Some(origins);
        self
    }

    pub fn with_current_yield(mut self, current_yield: f64) -> Self {
        self.current_yield = Some(current_yield);
        self
    }
}
