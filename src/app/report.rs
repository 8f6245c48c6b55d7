//! SQL-driven report job.
//!
//! Loads a report spec, renders its SQL for the requested period, runs it
//! against the configured datasource, and on a met trigger writes a CSV
//! into the output batch and notifies the report's business domain.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::warn;

use crate::app::job::{Job, JobContext};
use crate::domain::{
    AppError, Domain, JobSummary, Level, Period, ReportSpec, TriggerRule, fill_placeholders,
};

/// A [`Job`] built from one report spec file.
#[derive(Debug)]
pub struct ReportJob {
    spec: ReportSpec,
    spec_dir: PathBuf,
    domain: Domain,
    trigger: TriggerRule,
    name: String,
    period: Period,
}

impl ReportJob {
    /// Load a report spec from disk and bind it to a period and environment.
    ///
    /// Domain and trigger problems are hard errors here, not at run time;
    /// a report that can never fire should fail before any query runs.
    pub fn from_path(path: &Path, period: Period, env: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)?;
        let spec = ReportSpec::parse_yaml(&content)?;
        let domain = spec.domain()?;
        let trigger = spec.trigger()?;
        let name = format!("{}_{env}", spec.job_name());
        let spec_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();

        Ok(Self {
            spec,
            spec_dir,
            domain,
            trigger,
            name,
            period,
        })
    }

    pub fn title(&self) -> &str {
        self.spec.title()
    }

    /// SQL template text, inline or loaded from `sql_file` next to the spec file.
    fn sql_template(&self) -> Result<String, AppError> {
        if let Some(sql) = self.spec.inline_sql() {
            return Ok(sql.to_string());
        }
        let file = self
            .spec
            .sql_file()
            .ok_or_else(|| AppError::InvalidReportSpec("no sql or sql_file".into()))?;
        Ok(fs::read_to_string(self.spec_dir.join(file))?)
    }

    fn summary(&self, row_count: usize, triggered: bool) -> JobSummary {
        let mut summary = JobSummary::new();
        summary.insert("result_count".into(), serde_json::json!(row_count));
        summary.insert("triggered".into(), serde_json::json!(triggered));
        summary.insert("period".into(), serde_json::json!(self.period.as_str()));
        summary
    }
}

impl Job for ReportJob {
    fn domain(&self) -> Domain {
        self.domain
    }

    fn sub_domain(&self) -> Option<&str> {
        let sub = self.spec.sub_domain();
        (!sub.is_empty()).then_some(sub)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn run(&mut self, context: &JobContext<'_>) -> Result<JobSummary, AppError> {
        let now = Local::now().naive_local();
        let (start, end) = self.period.window(now);
        let app_id = context
            .config()
            .get_string("datasources.app_id")
            .or_else(|| context.config().get_string("app_id"))
            .unwrap_or_else(|| context.identity().app().to_string());

        let vars = [
            ("app_id", app_id),
            ("start_time", start.format("%Y-%m-%d %H:%M:%S").to_string()),
            ("end_time", end.format("%Y-%m-%d %H:%M:%S").to_string()),
            ("period", self.period.as_str().to_string()),
            ("today", now.format("%Y-%m-%d").to_string()),
            ("now", now.format("%Y-%m-%d %H:%M:%S").to_string()),
        ];
        let sql = fill_placeholders(&self.sql_template()?, &vars);

        println!(
            "[report] '{}' period {} | window {start} -> {end}",
            self.spec.title(),
            self.period
        );
        if context.dry_run() {
            println!("[report] dry run, SQL for '{}':\n{sql}", self.spec.source());
            return Ok(self.summary(0, false));
        }

        println!("[report] executing SQL on '{}'", self.spec.source());
        let mut connector = context.connector(self.spec.source())?;
        connector.connect()?;
        let result = connector.query(&sql);
        if let Err(err) = connector.disconnect() {
            warn!("disconnect from '{}' failed: {err}", self.spec.source());
        }
        let table = result?;

        let row_count = table.row_count();
        let triggered = self.trigger.evaluate(row_count);
        if !triggered {
            println!("[report] condition not met ({row_count} row(s)), no alert sent");
            return Ok(self.summary(row_count, false));
        }

        let report_path = context.output().path(&format!("{}_report.csv", self.period));
        fs::write(&report_path, table.to_csv())?;
        println!(
            "[report] {row_count} row(s) matched, written to {}",
            report_path.display()
        );

        let mut message_vars = vars.to_vec();
        message_vars.push(("row_count", row_count.to_string()));
        let message = format!(
            "{}\n\nDownload: {}",
            fill_placeholders(self.spec.message_template(), &message_vars),
            report_path.display()
        );
        context.notify(&format!("📊 {}", self.spec.title()), &message, Level::Info);

        Ok(self.summary(row_count, true))
    }
}
