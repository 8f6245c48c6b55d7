//! Check command implementation.

use crate::app::check::{CheckOptions, execute};
use crate::domain::{AppError, Identity};
use crate::services::Workspace;

pub fn run_check(
    workspace: &Workspace,
    region: Option<String>,
    app: Option<String>,
    env: Option<String>,
    strict: bool,
) -> Result<i32, AppError> {
    let identity = match (region, app, env) {
        (Some(region), Some(app), Some(env)) => Some(Identity::new(&region, &app, &env)?),
        (None, None, None) => None,
        _ => {
            return Err(AppError::config_error(
                "provide --region, --app, and --env together",
            ));
        }
    };

    let outcome = execute(workspace, &CheckOptions { identity, strict })?;
    Ok(outcome.exit_code)
}
