use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::TriggerRule;
use crate::domain::{AppError, Domain};

const DEFAULT_TITLE: &str = "Generic Report";
const DEFAULT_JOB_NAME: &str = "generic_reporter";
const DEFAULT_SUB_DOMAIN: &str = "data";
const DEFAULT_SOURCE: &str = "warehouse";
const DEFAULT_MESSAGE: &str = "Report triggered: {{row_count}} rows.";

/// Declarative definition of a scheduled report.
///
/// Every field is optional except that one of `sql` / `sql_file` must be
/// present; accessors supply the documented defaults. Field names are
/// strict so a typo in a report file fails at parse time instead of
/// silently using a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ReportSpec {
    title: Option<String>,
    domain: Option<String>,
    sub_domain: Option<String>,
    job_name: Option<String>,
    source: Option<String>,
    sql: Option<String>,
    sql_file: Option<PathBuf>,
    trigger_rule: Option<String>,
    message: Option<String>,
}

impl ReportSpec {
    pub fn parse_yaml(content: &str) -> Result<Self, AppError> {
        let spec: ReportSpec = serde_yaml::from_str(content)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.sql.is_none() && self.sql_file.is_none() {
            return Err(AppError::InvalidReportSpec(
                "must provide 'sql' or 'sql_file'".to_string(),
            ));
        }
        if let Some(name) = &self.domain {
            Domain::from_name(name)?;
        }
        if let Some(rule) = &self.trigger_rule {
            TriggerRule::parse(rule)?;
        }
        Ok(())
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn domain(&self) -> Result<Domain, AppError> {
        match &self.domain {
            Some(name) => Domain::from_name(name),
            None => Ok(Domain::Tech),
        }
    }

    pub fn sub_domain(&self) -> &str {
        self.sub_domain.as_deref().unwrap_or(DEFAULT_SUB_DOMAIN)
    }

    pub fn job_name(&self) -> &str {
        self.job_name.as_deref().unwrap_or(DEFAULT_JOB_NAME)
    }

    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(DEFAULT_SOURCE)
    }

    /// Inline SQL, preferred over `sql_file` when both are given.
    pub fn inline_sql(&self) -> Option<&str> {
        self.sql.as_deref()
    }

    /// Path of an external SQL file, interpreted relative to the spec file.
    pub fn sql_file(&self) -> Option<&Path> {
        self.sql_file.as_deref()
    }

    pub fn trigger(&self) -> Result<TriggerRule, AppError> {
        match &self.trigger_rule {
            Some(rule) => TriggerRule::parse(rule),
            None => Ok(TriggerRule::default()),
        }
    }

    pub fn message_template(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_MESSAGE)
    }
}
