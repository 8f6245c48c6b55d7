use std::io;

use thiserror::Error;

/// Library-wide error type for opsbench operations.
///
/// Environmental problems hit during configuration resolution (a missing or
/// malformed layer file) are deliberately *not* represented here: the
/// resolver degrades them to empty contributions and logs a warning. Only
/// requests for something structurally undefined surface as errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Workbench skeleton already present at the target location.
    #[error("Workbench already initialized ({0} exists)")]
    AlreadyInitialized(String),

    /// No workbench found at the given root.
    #[error("No workbench found at {0} (missing knowledge/ directory)")]
    WorkbenchNotFound(String),

    /// An identity segment (region, app, or env) is not a valid identifier.
    #[error("Invalid {field} '{value}': must be alphanumeric with hyphens or underscores")]
    InvalidIdentity { field: &'static str, value: String },

    /// Caller requested a datasource name absent from the `datasources` block.
    #[error("Datasource '{0}' is not defined in config")]
    DatasourceUndefined(String),

    /// Datasource exists but its `type` discriminator has no registered factory.
    #[error("Datasource '{name}' has unsupported type '{kind}'")]
    UnknownDatasourceKind { name: String, kind: String },

    /// Job domain outside the sanctioned set.
    #[error("Unknown domain '{0}': must be one of operations, marketing, risk, finance, tech")]
    UnknownDomain(String),

    /// Report trigger rule failed to parse.
    #[error("Invalid trigger rule '{0}': expected 'row_count <op> <count>'")]
    InvalidTriggerRule(String),

    /// Report spec is structurally unusable.
    #[error("Invalid report spec: {0}")]
    InvalidReportSpec(String),

    /// YAML (de)serialization error on a caller-supplied document.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error (run manifests, payloads).
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}
