//! Notify command implementation.

use crate::domain::{AppError, Identity, Level};
use crate::services::{ConfigResolver, Notifier, Workspace};

#[allow(clippy::too_many_arguments)]
pub fn run_notify(
    workspace: &Workspace,
    region: &str,
    app: &str,
    env: &str,
    key: &str,
    title: &str,
    message: &str,
    level: &str,
) -> Result<(), AppError> {
    workspace.ensure_initialized()?;
    let identity = Identity::new(region, app, env)?;
    let level = Level::from_name(level).ok_or_else(|| {
        AppError::config_error(format!(
            "unknown level '{level}' (expected info, warning, or error)"
        ))
    })?;

    let config = ConfigResolver::for_workspace(workspace).resolve(&identity);
    Notifier::new(&config).send(title, message, level, key);
    Ok(())
}
