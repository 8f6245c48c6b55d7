pub mod config;
pub mod error;
pub mod identity;
pub mod job;
pub mod notify;
pub mod report;
pub mod table;

pub use config::{EffectiveConfig, META_KEY, deep_merge, interpolate};
pub use error::AppError;
pub use identity::Identity;
pub use job::{Domain, JobSummary};
pub use notify::{ChannelSpec, Level, NotificationsConfig, RouteMatch, candidate_keys, resolve_route};
pub use report::{Period, ReportSpec, TriggerRule, fill_placeholders};
pub use table::{Row, Table};
