//! Resolve command implementation.

use crate::domain::{AppError, Identity};
use crate::services::ConfigResolver;
use crate::services::Workspace;

pub fn run_resolve(
    workspace: &Workspace,
    region: &str,
    app: &str,
    env: &str,
    format: &str,
) -> Result<(), AppError> {
    workspace.ensure_initialized()?;
    let identity = Identity::new(region, app, env)?;
    let config = ConfigResolver::for_workspace(workspace).resolve(&identity);

    match format {
        "yaml" => print!("{}", serde_yaml::to_string(&config)?),
        "json" => println!("{}", serde_json::to_string_pretty(&config)?),
        other => {
            return Err(AppError::config_error(format!(
                "unknown format '{other}' (expected yaml or json)"
            )));
        }
    }
    Ok(())
}
