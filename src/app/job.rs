//! Job harness: shared run wrapper around workbench jobs.
//!
//! A job declares what it is (domain, name) and the harness supplies the
//! rest: resolved configuration, an output batch, a notifier bound to the
//! job's routing key, and datasource connectors. Success writes run
//! metadata and can report the summary on the routing key; failure sends
//! an error notification and propagates.

use crate::domain::{AppError, Domain, EffectiveConfig, Identity, JobSummary, Level};
use crate::ports::Connector;
use crate::services::{ConfigResolver, ConnectorRegistry, Notifier, OutputBatch, Workspace};

/// A unit of work the workbench can run for an identity.
pub trait Job {
    fn domain(&self) -> Domain;

    fn sub_domain(&self) -> Option<&str> {
        None
    }

    fn name(&self) -> &str;

    fn notify_on_success(&self) -> bool {
        false
    }

    fn notify_on_failure(&self) -> bool {
        true
    }

    fn run(&mut self, context: &JobContext<'_>) -> Result<JobSummary, AppError>;
}

/// Everything a running job may need, resolved once by [`run_job`].
pub struct JobContext<'a> {
    identity: &'a Identity,
    config: &'a EffectiveConfig,
    output: &'a OutputBatch,
    registry: &'a ConnectorRegistry,
    notifier: &'a Notifier,
    routing_key: &'a str,
    dry_run: bool,
}

impl JobContext<'_> {
    pub fn identity(&self) -> &Identity {
        self.identity
    }

    pub fn config(&self) -> &EffectiveConfig {
        self.config
    }

    pub fn output(&self) -> &OutputBatch {
        self.output
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Connector for `datasources.{name}` in the resolved configuration.
    pub fn connector(&self, name: &str) -> Result<Box<dyn Connector>, AppError> {
        self.registry.source_connector(self.config, name)
    }

    /// Send a notification on this job's routing key.
    pub fn notify(&self, title: &str, message: &str, level: Level) {
        self.notifier.send(title, message, level, self.routing_key);
    }
}

/// Resolve, prepare, and run one job for one identity.
///
/// Dry runs still resolve and create the batch directory but skip run
/// metadata and notifications. Notification delivery failures are logged
/// by the notifier and never change the job outcome.
pub fn run_job(
    job: &mut dyn Job,
    workspace: &Workspace,
    identity: &Identity,
    registry: &ConnectorRegistry,
    dry_run: bool,
) -> Result<JobSummary, AppError> {
    workspace.ensure_initialized()?;

    let config = ConfigResolver::for_workspace(workspace).resolve(identity);
    let routing_key = job.domain().routing_key(job.sub_domain());
    let output = OutputBatch::create(
        workspace,
        job.domain(),
        job.sub_domain(),
        Some(identity.app()),
        job.name(),
    )?;
    let notifier = Notifier::new(&config);

    println!("Running job '{}' for {identity} [{routing_key}]", job.name());
    if dry_run {
        println!("(dry run: skipping run metadata and notifications)");
    }

    let context = JobContext {
        identity,
        config: &config,
        output: &output,
        registry,
        notifier: &notifier,
        routing_key: &routing_key,
        dry_run,
    };

    match job.run(&context) {
        Ok(summary) => {
            if !dry_run {
                output.write_meta(&config, &summary)?;
                if job.notify_on_success() {
                    notifier.send(
                        &format!("✅ Job complete: {}", job.name()),
                        &success_message(&output, &summary),
                        Level::Info,
                        &routing_key,
                    );
                }
            }
            println!("✅ Job '{}' completed.", job.name());
            Ok(summary)
        }
        Err(err) => {
            if !dry_run && job.notify_on_failure() {
                notifier.send(
                    &format!("❌ Job failed: {}", job.name()),
                    &err.to_string(),
                    Level::Error,
                    &routing_key,
                );
            }
            Err(err)
        }
    }
}

/// Success body: the batch directory plus one `key: value` line per
/// summary entry.
fn success_message(output: &OutputBatch, summary: &JobSummary) -> String {
    let mut lines = vec![format!("Output: {}", output.dir().display())];
    lines.extend(summary.iter().map(|(key, value)| match value {
        serde_json::Value::String(text) => format!("{key}: {text}"),
        other => format!("{key}: {other}"),
    }));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::META_FILE;
    use mockito::Matcher;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    struct FixedJob {
        fail: bool,
        on_success: bool,
    }

    impl FixedJob {
        fn passing() -> Self {
            Self { fail: false, on_success: false }
        }

        fn failing() -> Self {
            Self { fail: true, on_success: false }
        }

        fn reporting() -> Self {
            Self { fail: false, on_success: true }
        }
    }

    impl Job for FixedJob {
        fn domain(&self) -> Domain {
            Domain::Operations
        }

        fn name(&self) -> &str {
            "fixed"
        }

        fn notify_on_success(&self) -> bool {
            self.on_success
        }

        fn run(&mut self, _context: &JobContext<'_>) -> Result<JobSummary, AppError> {
            if self.fail {
                return Err(AppError::config_error("boom"));
            }
            let mut summary = JobSummary::new();
            summary.insert("result".into(), serde_json::json!(7));
            Ok(summary)
        }
    }

    fn initialized_workspace() -> (TempDir, Workspace) {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path());
        workspace.create_structure().unwrap();
        (dir, workspace)
    }

    fn identity() -> Identity {
        Identity::new("eu", "shop", "prod").unwrap()
    }

    fn workspace_with_channel(server_url: &str) -> (TempDir, Workspace) {
        let (dir, workspace) = initialized_workspace();
        fs::create_dir_all(workspace.platforms_root().join("eu/shop/prod")).unwrap();
        fs::write(
            workspace.platforms_root().join("eu/shop/prod/config.yaml"),
            format!(
                "notifications:\n  channels:\n    room:\n      type: webhook_chat\n      url: {server_url}/hook\n  business_domains:\n    operations: [room]\n"
            ),
        )
        .unwrap();
        (dir, workspace)
    }

    fn find_file(root: &Path, name: &str) -> Option<PathBuf> {
        for entry in fs::read_dir(root).ok()?.filter_map(Result::ok) {
            let path = entry.path();
            if path.is_dir() {
                if let Some(found) = find_file(&path, name) {
                    return Some(found);
                }
            } else if path.file_name().is_some_and(|n| n == name) {
                return Some(path);
            }
        }
        None
    }

    #[test]
    fn successful_run_writes_meta_and_returns_summary() {
        let (_dir, workspace) = initialized_workspace();
        let registry = ConnectorRegistry::new();

        let summary = run_job(
            &mut FixedJob::passing(),
            &workspace,
            &identity(),
            &registry,
            false,
        )
        .unwrap();

        assert_eq!(summary.get("result"), Some(&serde_json::json!(7)));
        let meta = find_file(&workspace.outputs_root(), META_FILE).expect("meta.json written");
        assert!(meta.starts_with(workspace.outputs_root().join("operations")));
    }

    #[test]
    fn failed_run_propagates_the_error() {
        let (_dir, workspace) = initialized_workspace();
        let registry = ConnectorRegistry::new();

        let err = run_job(
            &mut FixedJob::failing(),
            &workspace,
            &identity(),
            &registry,
            false,
        )
        .unwrap_err();

        assert!(err.to_string().contains("boom"));
        assert!(find_file(&workspace.outputs_root(), META_FILE).is_none());
    }

    #[test]
    fn dry_run_skips_meta() {
        let (_dir, workspace) = initialized_workspace();
        let registry = ConnectorRegistry::new();

        run_job(
            &mut FixedJob::passing(),
            &workspace,
            &identity(),
            &registry,
            true,
        )
        .unwrap();

        assert!(find_file(&workspace.outputs_root(), META_FILE).is_none());
    }

    #[test]
    fn failure_notifies_the_domain_channel() {
        let mut server = mockito::Server::new();
        let hook = server
            .mock("POST", "/hook")
            .with_status(200)
            .create();

        let (_dir, workspace) = workspace_with_channel(&server.url());
        let registry = ConnectorRegistry::new();

        let result = run_job(
            &mut FixedJob::failing(),
            &workspace,
            &identity(),
            &registry,
            false,
        );

        assert!(result.is_err());
        hook.assert();
    }

    #[test]
    fn success_notification_reports_output_dir_and_summary() {
        let mut server = mockito::Server::new();
        let hook = server
            .mock("POST", "/hook")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("Output: ".to_string()),
                Matcher::Regex("result: 7".to_string()),
            ]))
            .with_status(200)
            .create();

        let (_dir, workspace) = workspace_with_channel(&server.url());
        let registry = ConnectorRegistry::new();

        run_job(
            &mut FixedJob::reporting(),
            &workspace,
            &identity(),
            &registry,
            false,
        )
        .unwrap();

        hook.assert();
    }
}
