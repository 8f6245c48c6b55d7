pub mod effective;
pub mod interpolate;
pub mod merge;

pub use effective::{EffectiveConfig, META_KEY};
pub use interpolate::interpolate;
pub use merge::deep_merge;
