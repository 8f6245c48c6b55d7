//! In-memory fakes and fixture helpers shared by unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{AppError, EffectiveConfig, Table};
use crate::ports::{Connector, Environment};

/// Environment provider backed by a shared in-memory map.
///
/// Clones share state, so a test can hand one handle to a resolver and keep
/// another to observe what secret loading wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnvironment {
    vars: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vars(pairs: &[(&str, &str)]) -> Self {
        let env = Self::new();
        for (name, value) in pairs {
            env.set_var(name, value);
        }
        env
    }
}

impl Environment for MemoryEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.lock().unwrap().get(name).cloned()
    }

    fn set_var(&self, name: &str, value: &str) {
        self.vars.lock().unwrap().insert(name.to_string(), value.to_string());
    }
}

/// Build an [`EffectiveConfig`] straight from a YAML mapping literal.
pub fn effective_config(yaml: &str) -> EffectiveConfig {
    EffectiveConfig::new(serde_yaml::from_str(yaml).expect("fixture yaml is a mapping"))
}

/// Connector double returning a canned table and recording statements.
#[derive(Debug, Clone, Default)]
pub struct StubConnector {
    name: String,
    table: Table,
    fail_query: bool,
    connected: Arc<Mutex<bool>>,
    statements: Arc<Mutex<Vec<String>>>,
}

impl StubConnector {
    pub fn named(name: &str) -> Self {
        Self { name: name.to_string(), ..Self::default() }
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.table = table;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_query = true;
        self
    }

    /// Shared handle to the statements this connector has executed.
    pub fn statements(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.statements)
    }
}

impl Connector for StubConnector {
    fn name(&self) -> &str {
        &self.name
    }

    fn connect(&mut self) -> Result<(), AppError> {
        *self.connected.lock().unwrap() = true;
        Ok(())
    }

    fn query(&mut self, statement: &str) -> Result<Table, AppError> {
        if self.fail_query {
            return Err(AppError::config_error(format!(
                "stub connector '{}' set to fail",
                self.name
            )));
        }
        self.statements.lock().unwrap().push(statement.to_string());
        Ok(self.table.clone())
    }

    fn disconnect(&mut self) -> Result<(), AppError> {
        *self.connected.lock().unwrap() = false;
        Ok(())
    }
}
