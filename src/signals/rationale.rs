//! Rationale template rendering
//!
//! Templates support three placeholders:
//! - `{value}`: the derived metric (two decimals, or the sentiment name)
//! - `{a}` / `{b}`: the two inputs of a spread metric (two decimals)
//!
//! Anything else is copied through untouched.

use crate::models::SentimentFlag;

/// Values available to a template
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderValue {
    Numeric {
        value: f64,
        a: Option<f64>,
        b: Option<f64>,
    },
    Sentiment(SentimentFlag),
}

pub fn render(template: &str, value: &RenderValue) -> String {
    match value {
        RenderValue::Numeric { value, a, b } => {
            let mut out = template.replace("{value}", &format!("{:.2}", value));
            if let Some(a) = a {
                out = out.replace("{a}", &format!("{:.2}", a));
            }
            if let Some(b) = b {
                out = out.replace("{b}", &format!("{:.2}", b));
            }
            out
        }
        RenderValue::Sentiment(flag) => template.replace("{value}", flag.display_name()),
    }
}
