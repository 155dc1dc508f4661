//! Named rule table registry
//!
//! Names are write-once: registering an existing name fails instead of
//! replacing the table, so concurrent initializers cannot race each other
//! into a nondeterministic table set.

use crate::error::BiasError;
use crate::models::{BiasResult, IndicatorSnapshot, RuleTable};
use crate::rules::presets;
use crate::signals::engine::BiasEngine;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{debug, error, info};

pub const DEFAULT_RULE_TABLE: &str = "default";

static GLOBAL_REGISTRY: OnceLock<Arc<RuleTableRegistry>> = OnceLock::new();

pub struct RuleTableRegistry {
    tables: RwLock<HashMap<String, Arc<RuleTable>>>,
}

impl RuleTableRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry holding the built-in tables
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for (name, table) in presets::builtin_tables() {
            let registered = table.and_then(|table| registry.register(name, table));
            if let Err(e) = registered {
                error!(rule_table = name, error = %e, "Failed to register built-in rule table");
            }
        }
        registry
    }

    /// Process-wide registry, initialized with the built-in tables on first use
    pub fn global() -> Arc<RuleTableRegistry> {
        GLOBAL_REGISTRY
            .get_or_init(|| Arc::new(Self::with_builtins()))
            .clone()
    }

    pub fn register(&self, name: impl Into<String>, table: RuleTable) -> Result<(), BiasError> {
        self.register_all(vec![(name.into(), table)]).map(|_| ())
    }

    /// Register a batch of tables. Nothing is registered unless every name is
    /// non-empty, unique within the batch and not registered yet.
    pub fn register_all(&self, batch: Vec<(String, RuleTable)>) -> Result<usize, BiasError> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);

        {
            let mut seen = HashSet::new();
            for (name, _) in &batch {
                if name.trim().is_empty() {
                    return Err(BiasError::invalid_table("rule table name must not be empty"));
                }
                if tables.contains_key(name) || !seen.insert(name.as_str()) {
                    return Err(BiasError::DuplicateName(name.clone()));
                }
            }
        }

        let count = batch.len();
        for (name, table) in batch {
            info!(
                rule_table = %name,
                rules = table.rules().len(),
                "Registered rule table"
            );
            tables.insert(name, Arc::new(table));
        }
        Ok(count)
    }

    pub fn get(&self, name: &str) -> Result<Arc<RuleTable>, BiasError> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| BiasError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    pub fn list_names(&self) -> BTreeSet<String> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Score a snapshot against a registered table
    pub fn evaluate(
        &self,
        snapshot: &IndicatorSnapshot,
        rule_table_name: &str,
    ) -> Result<BiasResult, BiasError> {
        let table = self.get(rule_table_name)?;
        let result = BiasEngine::evaluate(snapshot, &table);
        debug!(
            rule_table = rule_table_name,
            score = result.score,
            label = result.label.as_str(),
            "Evaluated bias"
        );
        Ok(result)
    }
}

impl Default for RuleTableRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
