//! Embedded starter content deployed by `opsbench init`.
//!
//! This module provides static content for the knowledge tree and data
//! directories a fresh workbench starts from.

/// Scaffold entry with path relative to the workbench root and content.
pub struct ScaffoldEntry {
    pub path: &'static str,
    pub content: &'static str,
}

/// Directories a fresh workbench needs, relative to the root.
pub fn directories() -> Vec<&'static str> {
    vec![
        "knowledge/general",
        "knowledge/platforms",
        "data/outputs",
        "data/store",
        "data/tmp",
    ]
}

/// Starter files written once at init and owned by the operator afterwards.
pub fn starter_files() -> Vec<ScaffoldEntry> {
    vec![
        ScaffoldEntry { path: "knowledge/README.md", content: KNOWLEDGE_README },
        ScaffoldEntry { path: "knowledge/general/config.yaml", content: GENERAL_CONFIG },
    ]
}

const KNOWLEDGE_README: &str = r#"# Knowledge tree

Layered configuration for every platform this workbench operates.

Layers merge from broad to specific; the most specific value wins:

1. `general/config.yaml` - workbench-wide defaults
2. `platforms/{region}/config.yaml` - per-region overrides
3. `platforms/{region}/{app}/config.yaml` - per-app overrides
4. `platforms/{region}/{app}/{env}/config.yaml` - per-environment overrides

Any `config.yaml` may reference environment variables as `${VAR_NAME}`.
Unset variables are left verbatim so they are visible in rendered output.

Secrets live next to the environment layer in
`platforms/{region}/{app}/{env}/.env` (KEY=VALUE lines). They are loaded
into the environment right before the environment layer is parsed, so that
layer can reference them. Keep `.env` files out of version control.
"#;

const GENERAL_CONFIG: &str = r#"# Workbench-wide defaults. Region, app, and environment layers override
# these key by key; see knowledge/README.md for the merge rules.

timezone: UTC

notifications:
  # Channels used when no business_domains entry matches a routing key.
  default_channels: []

  # Delivery endpoints, referenced by id from the routing table below.
  channels: {}
  #   ops_room:
  #     type: webhook_chat
  #     url: ${OPS_ROOM_WEBHOOK_URL}
  #   duty_bot:
  #     type: bot_chat
  #     token: ${DUTY_BOT_TOKEN}
  #     chat_id: "-100200300"

  # Routing table: routing keys (and their prefixes) to channel ids.
  # An empty list mutes a key entirely.
  business_domains: {}
  #   finance: [ops_room]
  #   finance.payroll: [ops_room, duty_bot]

datasources: {}
#   warehouse:
#     type: mysql
#     host: ${WAREHOUSE_HOST}
#     port: 3306
#     user: ${WAREHOUSE_USER}
#     password: ${WAREHOUSE_PASSWORD}
#     database: analytics
"#;
