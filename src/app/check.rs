//! Knowledge tree diagnostics behind `opsbench check`.
//!
//! Walks every layer file for parse problems, then resolves each identity
//! and validates its `notifications` block against the defined channels.
//! The walk never mutates anything; secret loading during resolution is
//! routed into an overlay so nothing leaks into the process environment.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::domain::{AppError, ChannelSpec, Identity, NotificationsConfig};
use crate::ports::OverlayEnvironment;
use crate::services::{CONFIG_FILE, ConfigResolver, GENERAL_DIR, SECRETS_FILE, Workspace};

/// Options accepted by the check command.
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// Limit identity-level checks to a single identity.
    pub identity: Option<Identity>,
    /// Fail (exit 1) on warnings as well as errors.
    pub strict: bool,
}

/// Counts and the derived process exit code.
#[derive(Debug)]
pub struct CheckOutcome {
    pub errors: usize,
    pub warnings: usize,
    pub exit_code: i32,
}

#[derive(Debug)]
struct Diagnostic {
    context: String,
    message: String,
}

#[derive(Debug, Default)]
struct Diagnostics {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    fn push_error(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.errors.push(Diagnostic {
            context: context.into(),
            message: message.into(),
        });
    }

    fn push_warning(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(Diagnostic {
            context: context.into(),
            message: message.into(),
        });
    }

    fn emit(&self) {
        for diagnostic in &self.errors {
            println!("[ERROR] {}: {}", diagnostic.context, diagnostic.message);
        }
        for diagnostic in &self.warnings {
            println!("[WARN] {}: {}", diagnostic.context, diagnostic.message);
        }
    }
}

/// Run all checks against the workbench knowledge tree.
pub fn execute(workspace: &Workspace, options: &CheckOptions) -> Result<CheckOutcome, AppError> {
    workspace.ensure_initialized()?;

    let knowledge = workspace.knowledge_root();
    println!("Checking knowledge tree at {}", knowledge.display());

    let mut diagnostics = Diagnostics::default();
    check_layer_files(&knowledge, workspace, &mut diagnostics);

    let identities = match &options.identity {
        Some(identity) => vec![identity.clone()],
        None => discover_identities(&workspace.platforms_root(), &mut diagnostics),
    };
    for identity in &identities {
        check_identity(workspace, identity, &mut diagnostics);
    }

    diagnostics.emit();

    let errors = diagnostics.errors.len();
    let warnings = diagnostics.warnings.len();
    let exit_code = if errors > 0 {
        println!("Check failed: {errors} error(s), {warnings} warning(s) found.");
        1
    } else if options.strict && warnings > 0 {
        println!("Check failed in strict mode: {warnings} warning(s) found.");
        1
    } else if warnings > 0 {
        println!("Check completed with {warnings} warning(s).");
        0
    } else {
        println!("All checks passed.");
        0
    };

    Ok(CheckOutcome {
        errors,
        warnings,
        exit_code,
    })
}

/// Parse every layer file under `general/` and `platforms/**`.
fn check_layer_files(knowledge: &Path, workspace: &Workspace, diagnostics: &mut Diagnostics) {
    check_yaml_file(&knowledge.join(GENERAL_DIR).join(CONFIG_FILE), diagnostics);

    for region_dir in sorted_dirs(&workspace.platforms_root()) {
        check_yaml_file(&region_dir.join(CONFIG_FILE), diagnostics);
        for app_dir in sorted_dirs(&region_dir) {
            check_yaml_file(&app_dir.join(CONFIG_FILE), diagnostics);
            for env_dir in sorted_dirs(&app_dir) {
                check_yaml_file(&env_dir.join(CONFIG_FILE), diagnostics);
                check_env_file(&env_dir.join(SECRETS_FILE), diagnostics);
            }
        }
    }
}

/// A layer file must be readable and parse to a mapping (or nothing at all).
/// Missing files are not reported; every layer is optional.
fn check_yaml_file(path: &Path, diagnostics: &mut Diagnostics) {
    if !path.is_file() {
        return;
    }
    let context = path.display().to_string();
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            diagnostics.push_error(context, format!("unreadable: {err}"));
            return;
        }
    };
    match serde_yaml::from_str::<Value>(&raw) {
        Ok(Value::Mapping(_)) | Ok(Value::Null) => {}
        Ok(_) => diagnostics.push_error(context, "top level must be a mapping"),
        Err(err) => diagnostics.push_error(context, format!("invalid YAML: {err}")),
    }
}

/// Malformed `.env` lines are skipped at resolve time, so surface them here.
fn check_env_file(path: &Path, diagnostics: &mut Diagnostics) {
    if !path.is_file() {
        return;
    }
    let context = path.display().to_string();
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(err) => {
            diagnostics.push_error(context, format!("unreadable: {err}"));
            return;
        }
    };
    for entry in entries {
        if let Err(err) = entry {
            diagnostics.push_warning(&context, format!("line will be skipped: {err}"));
        }
    }
}

/// Every `platforms/{region}/{app}/{env}` directory triple is an identity.
fn discover_identities(platforms: &Path, diagnostics: &mut Diagnostics) -> Vec<Identity> {
    let mut identities = Vec::new();
    for region_dir in sorted_dirs(platforms) {
        for app_dir in sorted_dirs(&region_dir) {
            for env_dir in sorted_dirs(&app_dir) {
                let triple = (
                    dir_name(&region_dir),
                    dir_name(&app_dir),
                    dir_name(&env_dir),
                );
                match Identity::new(&triple.0, &triple.1, &triple.2) {
                    Ok(identity) => identities.push(identity),
                    Err(err) => diagnostics.push_warning(
                        env_dir.display().to_string(),
                        format!("skipped: {err}"),
                    ),
                }
            }
        }
    }
    identities
}

/// Resolve one identity and validate its notification wiring.
fn check_identity(workspace: &Workspace, identity: &Identity, diagnostics: &mut Diagnostics) {
    let resolver = ConfigResolver::with_environment(
        workspace.knowledge_root(),
        OverlayEnvironment::over_process(),
    );
    let config = resolver.resolve(identity);

    let Some(section) = config.subtree("notifications") else {
        return;
    };
    let context = identity.to_string();
    let notifications: NotificationsConfig =
        match serde_yaml::from_value(Value::Mapping(section.clone())) {
            Ok(notifications) => notifications,
            Err(err) => {
                diagnostics.push_error(context, format!("notifications section is malformed: {err}"));
                return;
            }
        };

    for (id, descriptor) in &notifications.channels {
        if let Err(err) = serde_yaml::from_value::<ChannelSpec>(descriptor.clone()) {
            diagnostics.push_error(&context, format!("channel '{id}' has an invalid descriptor: {err}"));
        }
    }

    let mut referenced = Vec::new();
    for (key, channel_ids) in &notifications.business_domains {
        for id in channel_ids {
            referenced.push(id.clone());
            if !notifications.channels.contains_key(id) {
                diagnostics.push_warning(
                    &context,
                    format!("business_domains '{key}' references undefined channel '{id}'"),
                );
            }
        }
    }
    for id in &notifications.default_channels {
        referenced.push(id.clone());
        if !notifications.channels.contains_key(id) {
            diagnostics.push_warning(
                &context,
                format!("default_channels references undefined channel '{id}'"),
            );
        }
    }

    for id in notifications.channels.keys() {
        if !referenced.iter().any(|r| r == id) {
            diagnostics.push_warning(&context, format!("channel '{id}' is defined but never referenced"));
        }
    }
}

fn sorted_dirs(path: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(path) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
