use std::fmt;

use super::AppError;

/// The (region, app, env) triple that selects one effective configuration.
///
/// Guarantees for every segment:
/// - Non-empty
/// - Contains only ASCII alphanumeric characters, `-`, or `_`
///
/// Segments map directly to directory names under `knowledge/platforms/`,
/// so the character set also rules out path traversal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    region: String,
    app: String,
    env: String,
}

impl Identity {
    pub fn new(region: &str, app: &str, env: &str) -> Result<Self, AppError> {
        validate_segment("region", region)?;
        validate_segment("app", app)?;
        validate_segment("env", env)?;
        Ok(Self {
            region: region.to_string(),
            app: app.to_string(),
            env: env.to_string(),
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn app(&self) -> &str {
        &self.app
    }

    pub fn env(&self) -> &str {
        &self.env
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.region, self.app, self.env)
    }
}

fn validate_segment(field: &'static str, value: &str) -> Result<(), AppError> {
    let valid = !value.is_empty()
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::InvalidIdentity { field, value: value.to_string() })
    }
}
