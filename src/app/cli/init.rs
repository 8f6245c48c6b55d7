//! Init command implementation.

use crate::domain::AppError;
use crate::services::Workspace;

pub fn run_init(workspace: &Workspace) -> Result<(), AppError> {
    workspace.create_structure()?;
    println!("✅ Initialized workbench at {}", workspace.root().display());
    println!("Next: describe your platforms under knowledge/platforms/.");
    Ok(())
}
