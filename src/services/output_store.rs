//! Timestamped output directories and run metadata.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::domain::{AppError, Domain, EffectiveConfig, JobSummary};
use crate::services::Workspace;

/// Metadata manifest written next to a batch's output files.
pub const META_FILE: &str = "meta.json";

/// One job run's output directory under
/// `data/outputs/{domain}/{sub_domain?}/{app|common}/{YYYY-MM}/{job}_{DD_HHMMSS}`.
///
/// The month layer keeps directories browsable after years of cron runs;
/// the batch suffix keeps two runs on the same day from colliding.
#[derive(Debug)]
pub struct OutputBatch {
    domain: Domain,
    sub_domain: Option<String>,
    job_name: String,
    started_at: DateTime<Local>,
    dir: PathBuf,
}

impl OutputBatch {
    /// Create (and mkdir) the batch directory for a run starting now.
    pub fn create(
        workspace: &Workspace,
        domain: Domain,
        sub_domain: Option<&str>,
        app: Option<&str>,
        job_name: &str,
    ) -> Result<Self, AppError> {
        let started_at = Local::now();
        let mut base = workspace.outputs_root().join(domain.dir_name());
        if let Some(sub) = sub_domain {
            base = base.join(sub);
        }
        base = base.join(app.unwrap_or("common"));

        let month = started_at.format("%Y-%m").to_string();
        let batch = format!("{job_name}_{}", started_at.format("%d_%H%M%S"));
        let dir = base.join(month).join(batch);
        fs::create_dir_all(&dir)?;

        Ok(Self {
            domain,
            sub_domain: sub_domain.map(str::to_string),
            job_name: job_name.to_string(),
            started_at,
            dir,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path for a file inside the batch directory.
    pub fn path(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Write `meta.json` describing this run: when it ran, what job it was,
    /// which configuration identity it resolved, and the job's summary.
    pub fn write_meta(
        &self,
        config: &EffectiveConfig,
        extra: &JobSummary,
    ) -> Result<PathBuf, AppError> {
        let config_context = match config.meta() {
            Some(meta) => serde_json::to_value(meta)?,
            None => serde_json::json!({}),
        };
        let meta = serde_json::json!({
            "timestamp": self.started_at.to_rfc3339(),
            "job": {
                "domain": self.domain.dir_name(),
                "sub_domain": self.sub_domain,
                "name": self.job_name,
                "output_dir": self.dir.display().to_string(),
            },
            "config_context": config_context,
            "extra": extra,
        });

        let path = self.path(META_FILE);
        fs::write(&path, serde_json::to_string_pretty(&meta)?)?;
        println!("[outputs] metadata saved to {}", path.display());
        Ok(path)
    }
}
