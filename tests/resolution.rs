//! Resolution through the library API with the real process environment.
//!
//! Secret loading writes into the process environment, so every test here
//! is serialized and cleans up the variables it plants.

use opsbench::{ConfigResolver, Identity, Workspace};
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn workbench() -> (TempDir, Workspace) {
    let dir = TempDir::new().unwrap();
    let workspace = Workspace::new(dir.path());
    workspace.create_structure().unwrap();
    (dir, workspace)
}

#[test]
#[serial]
fn secrets_load_into_the_process_environment() {
    let (_dir, workspace) = workbench();
    let leaf = workspace.platforms_root().join("eu/shop/prod");
    write_file(&leaf.join("config.yaml"), "token: ${OPSBENCH_IT_SECRET}\n");
    write_file(&leaf.join(".env"), "OPSBENCH_IT_SECRET=from-env-file\n");

    let identity = Identity::new("eu", "shop", "prod").unwrap();
    let config = ConfigResolver::for_workspace(&workspace).resolve(&identity);

    assert_eq!(config.get_str("token"), Some("from-env-file"));
    assert_eq!(
        std::env::var("OPSBENCH_IT_SECRET").as_deref(),
        Ok("from-env-file")
    );

    unsafe { std::env::remove_var("OPSBENCH_IT_SECRET") };
}

#[test]
#[serial]
fn secrets_override_a_preexisting_process_value() {
    unsafe { std::env::set_var("OPSBENCH_IT_OVERRIDE", "stale") };

    let (_dir, workspace) = workbench();
    let leaf = workspace.platforms_root().join("eu/shop/prod");
    write_file(&leaf.join("config.yaml"), "token: ${OPSBENCH_IT_OVERRIDE}\n");
    write_file(&leaf.join(".env"), "OPSBENCH_IT_OVERRIDE=fresh\n");

    let identity = Identity::new("eu", "shop", "prod").unwrap();
    let config = ConfigResolver::for_workspace(&workspace).resolve(&identity);

    assert_eq!(config.get_str("token"), Some("fresh"));

    unsafe { std::env::remove_var("OPSBENCH_IT_OVERRIDE") };
}

#[test]
#[serial]
fn resolving_twice_yields_the_same_configuration() {
    let (_dir, workspace) = workbench();
    let leaf = workspace.platforms_root().join("eu/shop/prod");
    write_file(
        &leaf.join("config.yaml"),
        "token: ${OPSBENCH_IT_REPEAT}\nnested:\n  a: 1\n",
    );
    write_file(&leaf.join(".env"), "OPSBENCH_IT_REPEAT=same\n");

    let identity = Identity::new("eu", "shop", "prod").unwrap();
    let resolver = ConfigResolver::for_workspace(&workspace);
    let first = resolver.resolve(&identity);
    let second = resolver.resolve(&identity);

    assert_eq!(
        serde_yaml::to_string(&first).unwrap(),
        serde_yaml::to_string(&second).unwrap()
    );

    unsafe { std::env::remove_var("OPSBENCH_IT_REPEAT") };
}

#[test]
#[serial]
fn only_the_requested_leaf_secrets_are_loaded() {
    let (_dir, workspace) = workbench();
    let prod = workspace.platforms_root().join("eu/shop/prod");
    let stg = workspace.platforms_root().join("eu/shop/stg");
    write_file(&prod.join("config.yaml"), "env_name: prod\n");
    write_file(&prod.join(".env"), "OPSBENCH_IT_PROD_ONLY=yes\n");
    write_file(&stg.join("config.yaml"), "env_name: stg\n");
    write_file(&stg.join(".env"), "OPSBENCH_IT_STG_ONLY=yes\n");

    let identity = Identity::new("eu", "shop", "prod").unwrap();
    ConfigResolver::for_workspace(&workspace).resolve(&identity);

    assert!(std::env::var("OPSBENCH_IT_PROD_ONLY").is_ok());
    assert!(std::env::var("OPSBENCH_IT_STG_ONLY").is_err());

    unsafe { std::env::remove_var("OPSBENCH_IT_PROD_ONLY") };
}
