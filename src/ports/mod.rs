mod connector;
mod environment;

pub use connector::Connector;
pub use environment::{Environment, OverlayEnvironment, ProcessEnvironment};
