//! opsbench: layered configuration, notification routing, and report runs for operations platforms.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

pub use app::check::{CheckOptions, CheckOutcome};
pub use app::job::{Job, JobContext, run_job};
pub use app::report::ReportJob;
pub use domain::{
    AppError, Domain, EffectiveConfig, Identity, JobSummary, Level, Period, ReportSpec, Table,
    TriggerRule,
};
pub use ports::{Connector, Environment};
pub use services::{ConfigResolver, ConnectorRegistry, Notifier, OutputBatch, Workspace};

/// Resolve the effective configuration for an identity in the current
/// workbench directory.
pub fn resolve(region: &str, app: &str, env: &str) -> Result<EffectiveConfig, AppError> {
    let workspace = Workspace::current()?;
    workspace.ensure_initialized()?;

    let identity = Identity::new(region, app, env)?;
    Ok(ConfigResolver::for_workspace(&workspace).resolve(&identity))
}

/// Send a notification through the routing table in `config`.
///
/// Fire and forget: the console echo always happens, delivery problems are
/// logged per channel and never returned.
pub fn notify(config: &EffectiveConfig, title: &str, message: &str, level: Level, routing_key: &str) {
    Notifier::new(config).send(title, message, level, routing_key);
}

/// Load a report spec and run it for an identity in the current workbench.
///
/// The job name is suffixed with the identity's environment, so the same
/// spec run against `staging` and `prod` lands in distinct output batches.
pub fn run_report(
    spec_path: &Path,
    period: Period,
    region: &str,
    app: &str,
    env: &str,
    registry: &ConnectorRegistry,
    dry_run: bool,
) -> Result<JobSummary, AppError> {
    let workspace = Workspace::current()?;
    let identity = Identity::new(region, app, env)?;

    let mut job = ReportJob::from_path(spec_path, period, identity.env())?;
    run_job(&mut job, &workspace, &identity, registry, dry_run)
}

/// Validate the current workbench's knowledge tree.
pub fn check(options: CheckOptions) -> Result<CheckOutcome, AppError> {
    let workspace = Workspace::current()?;
    app::check::execute(&workspace, &options)
}
