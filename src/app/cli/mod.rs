//! CLI adapter.

mod check;
mod init;
mod notify;
mod resolve;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::domain::AppError;
use crate::services::Workspace;

#[derive(Parser)]
#[command(name = "opsbench")]
#[command(version)]
#[command(
    about = "Layered configuration, notification routing, and report runs for ops platforms",
    long_about = None
)]
struct Cli {
    /// Workbench root (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the workbench knowledge and data directory structure
    #[clap(visible_alias = "i")]
    Init,
    /// Print the effective configuration for a region/app/env identity
    #[clap(visible_alias = "r")]
    Resolve {
        /// Platform region, e.g. eu
        region: String,
        /// Application within the region
        app: String,
        /// Environment leaf, e.g. prod
        env: String,
        /// Output format: yaml or json
        #[arg(long, default_value = "yaml")]
        format: String,
    },
    /// Send a notification through an identity's routing table
    #[clap(visible_alias = "n")]
    Notify {
        /// Platform region
        region: String,
        /// Application within the region
        app: String,
        /// Environment leaf
        env: String,
        /// Routing key, e.g. finance.payroll
        #[arg(long, default_value = "default")]
        key: String,
        /// Notification title
        #[arg(long)]
        title: String,
        /// Notification body
        #[arg(long)]
        message: String,
        /// Severity: info, warning, or error
        #[arg(long, default_value = "info")]
        level: String,
    },
    /// Validate the knowledge tree and notification wiring
    Check {
        /// Limit identity checks to one region
        #[arg(long, requires = "app", requires = "env")]
        region: Option<String>,
        /// Application, required with --region
        #[arg(long, requires = "region")]
        app: Option<String>,
        /// Environment, required with --region
        #[arg(long, requires = "region")]
        env: Option<String>,
        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();

    let result: Result<i32, AppError> =
        workspace_for(cli.root.as_deref()).and_then(|workspace| match cli.command {
            Commands::Init => init::run_init(&workspace).map(|_| 0),
            Commands::Resolve {
                region,
                app,
                env,
                format,
            } => resolve::run_resolve(&workspace, &region, &app, &env, &format).map(|_| 0),
            Commands::Notify {
                region,
                app,
                env,
                key,
                title,
                message,
                level,
            } => {
                notify::run_notify(&workspace, &region, &app, &env, &key, &title, &message, &level)
                    .map(|_| 0)
            }
            Commands::Check {
                region,
                app,
                env,
                strict,
            } => check::run_check(&workspace, region, app, env, strict),
        });

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn workspace_for(root: Option<&Path>) -> Result<Workspace, AppError> {
    match root {
        Some(root) => Ok(Workspace::new(root)),
        None => Workspace::current(),
    }
}
