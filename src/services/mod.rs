mod config_resolver;
mod connector_registry;
mod notifier;
mod output_store;
pub mod scaffold;
mod workspace;

pub use config_resolver::{CONFIG_FILE, ConfigResolver, GENERAL_DIR, PLATFORMS_DIR, SECRETS_FILE};
pub use connector_registry::{ConnectorFactory, ConnectorRegistry};
pub use notifier::Notifier;
pub use output_store::{META_FILE, OutputBatch};
pub use workspace::{DATA_DIR, KNOWLEDGE_DIR, Workspace};
