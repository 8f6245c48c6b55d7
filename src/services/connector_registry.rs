//! Datasource lookup and connector construction.

use std::collections::BTreeMap;
use std::fmt;

use serde_yaml::Mapping;

use crate::domain::{AppError, EffectiveConfig};
use crate::ports::Connector;

/// Builds a connector from the datasource name and its configuration block.
pub type ConnectorFactory = Box<dyn Fn(&str, &Mapping) -> Result<Box<dyn Connector>, AppError>>;

/// Maps `type` discriminators to connector factories.
///
/// The registry itself ships empty: drivers live with the embedding
/// application, which registers a factory per kind it supports (for example
/// `mysql` or `google_sheet`). Lookup failures are hard errors; a job asking
/// for an undefined datasource is a bug in its config, not a degraded mode.
#[derive(Default)]
pub struct ConnectorRegistry {
    factories: BTreeMap<String, ConnectorFactory>,
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for a `type` discriminator, replacing any previous
    /// registration for the same kind.
    pub fn register<F>(&mut self, kind: &str, factory: F)
    where
        F: Fn(&str, &Mapping) -> Result<Box<dyn Connector>, AppError> + 'static,
    {
        self.factories.insert(kind.to_string(), Box::new(factory));
    }

    pub fn kinds(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Build the connector for `datasources.{name}` in `config`.
    pub fn source_connector(
        &self,
        config: &EffectiveConfig,
        name: &str,
    ) -> Result<Box<dyn Connector>, AppError> {
        let sources = config
            .subtree("datasources")
            .ok_or_else(|| AppError::DatasourceUndefined(name.to_string()))?;
        let source = sources
            .get(name)
            .ok_or_else(|| AppError::DatasourceUndefined(name.to_string()))?;
        let block = source.as_mapping().ok_or_else(|| {
            AppError::config_error(format!("datasource '{name}' must be a mapping"))
        })?;
        let kind = block
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                AppError::config_error(format!("datasource '{name}' is missing a 'type' field"))
            })?;
        let factory = self.factories.get(kind).ok_or_else(|| AppError::UnknownDatasourceKind {
            name: name.to_string(),
            kind: kind.to_string(),
        })?;
        factory(name, block)
    }
}

impl fmt::Debug for ConnectorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorRegistry").field("kinds", &self.kinds()).finish()
    }
}
