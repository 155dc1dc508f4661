//! Presentation adapter contract.
//!
//! A presenter receives a finished [`BiasReport`] and turns it into whatever
//! its surface needs (text, HTML, a chart annotation). Presenters never
//! evaluate or fetch anything themselves.

use crate::models::{BiasLabel, BiasReport, DataOrigin, TradingFocus};
use std::fmt::Write;

pub trait BiasPresenter {
    type Output;

    fn present(&self, report: &BiasReport) -> Self::Output;
}

/// Plain-text report for terminals and logs
#[derive(Debug, Default, Clone, Copy)]
pub struct TextPresenter;

impl TextPresenter {
    fn headline(label: BiasLabel, score: i32) -> String {
        let text = match label {
            BiasLabel::StrongSell => "STRONG SELL (bearish)",
            BiasLabel::Sell => "SELL (bearish)",
            BiasLabel::Neutral => "NEUTRAL",
            BiasLabel::Buy => "BUY (bullish)",
            BiasLabel::StrongBuy => "STRONG BUY (bullish)",
        };
        format!("{} | Score: {}", text, score)
    }

    fn focus(focus: TradingFocus) -> &'static str {
        match focus {
            TradingFocus::Short => "SHORT",
            TradingFocus::Long => "LONG",
            TradingFocus::Caution => "CAUTION",
        }
    }
}

impl BiasPresenter for TextPresenter {
    type Output = String;

    fn present(&self, report: &BiasReport) -> String {
        let mut out = String::new();
        let snapshot = &report.snapshot;

        let _ = writeln!(out, "Fundamental bias ({})", report.rule_table);
        let _ = writeln!(
            out,
            "  {}",
            Self::headline(report.result.label, report.result.score)
        );
        let _ = writeln!(
            out,
            "  Rates: A {:.2}% / B {:.2}%   CPI: A {:.2}% / B {:.2}%",
            snapshot.policy_rate_a(),
            snapshot.policy_rate_b(),
            snapshot.inflation_a(),
            snapshot.inflation_b()
        );
        match report.current_yield {
            Some(current) => {
                let _ = writeln!(
                    out,
                    "  Long yield: {:.2}% ({:+.2})   Sentiment: {}",
                    current,
                    snapshot.bond_yield_change(),
                    snapshot.sentiment_flag()
                );
            }
            None => {
                let _ = writeln!(
                    out,
                    "  Yield change: {:+.2}   Sentiment: {}",
                    snapshot.bond_yield_change(),
                    snapshot.sentiment_flag()
                );
            }
        }

        if let Some(origins) = &report.origins {
            for (name, origin) in [("Macro data", &origins.macro_data), ("Yield data", &origins.yield_data)] {
                if let DataOrigin::Fallback { reason } = origin {
                    let _ = writeln!(out, "  {} unavailable, showing defaults ({})", name, reason);
                }
            }
        }

        if let Some(technical) = &report.technical {
            let _ = writeln!(out, "Price");
            let _ = writeln!(
                out,
                "  {} {:.4} ({:+.4})",
                technical.symbol, technical.current_price, technical.change
            );
            let _ = writeln!(out, "  {}", technical.trend.description());
        }

        let _ = writeln!(out, "Rationale");
        if report.result.rationale.is_empty() {
            let _ = writeln!(out, "  - no rule triggered");
        }
        for reason in &report.result.rationale {
            let _ = writeln!(out, "  - {}", reason);
        }

        let _ = writeln!(out, "Trading plan");
        let _ = writeln!(
            out,
            "  Focus: {}. {}",
            Self::focus(report.focus),
            report.focus.guidance()
        );

        out
    }
}
