//! Rule table registry and built-in presets.

pub mod loader;
pub mod presets;
pub mod registry;

pub use loader::{load_rule_tables, NamedRuleTable};
pub use registry::{RuleTableRegistry, DEFAULT_RULE_TABLE};
