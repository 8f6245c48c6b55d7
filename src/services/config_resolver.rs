//! Layered configuration resolution for one (region, app, env) identity.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde_yaml::{Mapping, Value};

use crate::domain::config::{META_KEY, deep_merge, interpolate};
use crate::domain::{EffectiveConfig, Identity};
use crate::ports::{Environment, ProcessEnvironment};
use crate::services::Workspace;

/// File name of a layer document inside its directory.
pub const CONFIG_FILE: &str = "config.yaml";

/// File name of the per-environment secrets file.
pub const SECRETS_FILE: &str = ".env";

/// Directory of the global layer under the knowledge root.
pub const GENERAL_DIR: &str = "general";

/// Directory housing the region trees under the knowledge root.
pub const PLATFORMS_DIR: &str = "platforms";

/// Resolves effective configurations from a knowledge tree.
///
/// Resolution never fails: a missing or malformed layer contributes nothing
/// and is logged, so an incomplete tree still yields a usable (possibly
/// empty) configuration. The environment provider is injected because
/// resolution both reads variables for `${VAR}` interpolation and writes
/// them when loading secrets.
#[derive(Debug)]
pub struct ConfigResolver<E: Environment = ProcessEnvironment> {
    knowledge_root: PathBuf,
    env: E,
}

impl ConfigResolver {
    /// Resolver over the given knowledge root, backed by the process
    /// environment.
    pub fn new(knowledge_root: impl Into<PathBuf>) -> Self {
        Self::with_environment(knowledge_root, ProcessEnvironment)
    }

    pub fn for_workspace(workspace: &Workspace) -> Self {
        Self::new(workspace.knowledge_root())
    }
}

impl<E: Environment> ConfigResolver<E> {
    pub fn with_environment(knowledge_root: impl Into<PathBuf>, env: E) -> Self {
        Self { knowledge_root: knowledge_root.into(), env }
    }

    /// Layer documents for an identity, in merge order (broad to specific).
    pub fn layer_paths(&self, identity: &Identity) -> [PathBuf; 4] {
        let region_dir = self.knowledge_root.join(PLATFORMS_DIR).join(identity.region());
        let app_dir = region_dir.join(identity.app());
        let env_dir = app_dir.join(identity.env());
        [
            self.knowledge_root.join(GENERAL_DIR).join(CONFIG_FILE),
            region_dir.join(CONFIG_FILE),
            app_dir.join(CONFIG_FILE),
            env_dir.join(CONFIG_FILE),
        ]
    }

    /// Directory of the most specific layer; `_meta.config_path` points here.
    pub fn environment_dir(&self, identity: &Identity) -> PathBuf {
        self.knowledge_root
            .join(PLATFORMS_DIR)
            .join(identity.region())
            .join(identity.app())
            .join(identity.env())
    }

    /// Merge the four layers for `identity` into one effective configuration.
    ///
    /// Secrets from the environment layer's `.env` are loaded into the
    /// environment provider (override on conflict) after the app layer has
    /// merged and before the environment layer is read, so only that final
    /// layer can interpolate freshly loaded values.
    pub fn resolve(&self, identity: &Identity) -> EffectiveConfig {
        let [general, region, app, env_layer] = self.layer_paths(identity);
        let mut merged = Value::Mapping(Mapping::new());
        self.merge_layer(&mut merged, &general);
        self.merge_layer(&mut merged, &region);
        self.merge_layer(&mut merged, &app);

        let env_dir = self.environment_dir(identity);
        let secrets_path = env_dir.join(SECRETS_FILE);
        let has_secrets = secrets_path.is_file();
        if has_secrets {
            self.load_secrets(&secrets_path);
        }
        self.merge_layer(&mut merged, &env_layer);

        let mut root = match merged {
            Value::Mapping(map) => map,
            _ => Mapping::new(),
        };
        root.insert(
            META_KEY.into(),
            Value::Mapping(build_meta(
                identity,
                &env_dir,
                has_secrets.then_some(secrets_path.as_path()),
            )),
        );
        debug!("resolved config for {identity}");
        EffectiveConfig::new(root)
    }

    fn merge_layer(&self, merged: &mut Value, path: &Path) {
        if let Some(layer) = self.load_layer(path) {
            deep_merge(merged, Value::Mapping(layer));
        }
    }

    /// Load one layer document, or `None` when it contributes nothing.
    fn load_layer(&self, path: &Path) -> Option<Mapping> {
        if !path.is_file() {
            debug!("layer {} not present, skipping", path.display());
            return None;
        }
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("layer {} unreadable, skipping: {err}", path.display());
                return None;
            }
        };
        let rendered = interpolate(&raw, |name| self.env.var(name));
        match serde_yaml::from_str::<Value>(&rendered) {
            Ok(Value::Mapping(map)) => Some(map),
            Ok(Value::Null) => {
                debug!("layer {} is empty, skipping", path.display());
                None
            }
            Ok(_) => {
                warn!("layer {} root is not a mapping, skipping", path.display());
                None
            }
            Err(err) => {
                warn!("layer {} is not valid YAML, skipping: {err}", path.display());
                None
            }
        }
    }

    fn load_secrets(&self, path: &Path) {
        let entries = match dotenvy::from_path_iter(path) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("secrets file {} unreadable, skipping: {err}", path.display());
                return;
            }
        };
        let mut loaded = 0usize;
        for entry in entries {
            match entry {
                Ok((key, value)) => {
                    self.env.set_var(&key, &value);
                    loaded += 1;
                }
                Err(err) => {
                    warn!("secrets file {}: skipping malformed entry: {err}", path.display());
                }
            }
        }
        debug!("loaded {loaded} secrets from {}", path.display());
    }
}

fn build_meta(identity: &Identity, env_dir: &Path, secrets: Option<&Path>) -> Mapping {
    let mut meta = Mapping::new();
    meta.insert("region".into(), identity.region().into());
    meta.insert("app".into(), identity.app().into());
    meta.insert("env".into(), identity.env().into());
    meta.insert("config_path".into(), env_dir.display().to_string().into());
    meta.insert(
        "secrets_path".into(),
        match secrets {
            Some(path) => path.display().to_string().into(),
            None => Value::Null,
        },
    );
    meta
}
