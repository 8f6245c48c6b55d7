pub mod channel;
pub mod routing;

pub use channel::{ChannelSpec, Level, NotificationsConfig};
pub use routing::{DEFAULT_KEY, RouteMatch, candidate_keys, resolve_route};
