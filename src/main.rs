//! Prints the current fundamental bias report.
//!
//! Readings come from the environment (see `config`). Positional arguments
//! override the rule table and the sentiment flag:
//!
//! ```text
//! macrobias [RULE_TABLE] [SENTIMENT]
//! ```

use dotenvy::dotenv;
use macrobias::config::Config;
use macrobias::core::BiasContext;
use macrobias::logging;
use macrobias::presentation::{BiasPresenter, TextPresenter};
use macrobias::rules::load_rule_tables;
use macrobias::{RuleTableRegistry, SentimentFlag};
use std::str::FromStr;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    let mut args = std::env::args().skip(1);
    let rule_table = args.next().unwrap_or_else(|| config.rule_table.clone());
    let sentiment = match args.next() {
        Some(raw) => SentimentFlag::from_str(&raw)?,
        None => config.sentiment,
    };

    let registry = RuleTableRegistry::global();
    if let Some(path) = &config.rule_tables_path {
        load_rule_tables(&registry, path)?;
    }

    info!(
        environment = %config.environment,
        rule_table = %rule_table,
        sentiment = %sentiment,
        "Generating bias report"
    );

    let context = BiasContext::from_config(&config, registry, None);
    let report = context.report(sentiment, Some(&rule_table)).await?;

    print!("{}", TextPresenter.present(&report));
    Ok(())
}
