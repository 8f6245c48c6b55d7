pub mod period;
pub mod spec;
pub mod template;
pub mod trigger;

pub use period::Period;
pub use spec::ReportSpec;
pub use template::fill_placeholders;
pub use trigger::{Comparison, TriggerRule};
