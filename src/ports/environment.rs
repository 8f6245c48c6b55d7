use std::collections::HashMap;
use std::env;
use std::sync::Mutex;

/// Port for reading and writing process-style environment variables.
///
/// Configuration resolution both reads variables (interpolation) and writes
/// them (secret loading), so the provider is an explicit dependency; tests
/// substitute an in-memory provider instead of mutating real process state.
pub trait Environment {
    /// Current value of `name`, if set.
    fn var(&self, name: &str) -> Option<String>;

    /// Set `name` to `value`, overriding any existing value.
    fn set_var(&self, name: &str, value: &str);
}

/// Provider backed by the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    fn set_var(&self, name: &str, value: &str) {
        // SAFETY: the workbench core is single-threaded; loaded secrets are
        // a documented process-wide side effect, read back through `var`.
        unsafe { env::set_var(name, value) }
    }
}

/// Provider that reads through to a base provider but keeps writes local.
///
/// Validation passes resolve every identity in the tree, which would load
/// every leaf's secrets into the process; routing writes into an overlay
/// keeps those resolutions side-effect free.
#[derive(Debug, Default)]
pub struct OverlayEnvironment<B: Environment = ProcessEnvironment> {
    base: B,
    overlay: Mutex<HashMap<String, String>>,
}

impl OverlayEnvironment {
    /// Overlay on top of the real process environment.
    pub fn over_process() -> Self {
        Self::new(ProcessEnvironment)
    }
}

impl<B: Environment> OverlayEnvironment<B> {
    pub fn new(base: B) -> Self {
        Self {
            base,
            overlay: Mutex::new(HashMap::new()),
        }
    }
}

impl<B: Environment> Environment for OverlayEnvironment<B> {
    fn var(&self, name: &str) -> Option<String> {
        let local = self
            .overlay
            .lock()
            .ok()
            .and_then(|map| map.get(name).cloned());
        local.or_else(|| self.base.var(name))
    }

    fn set_var(&self, name: &str, value: &str) {
        if let Ok(mut map) = self.overlay.lock() {
            map.insert(name.to_string(), value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryEnvironment;

    #[test]
    fn overlay_shadows_base_after_write() {
        let base = MemoryEnvironment::with_vars(&[("SHARED", "base"), ("BASE_ONLY", "kept")]);
        let env = OverlayEnvironment::new(base);

        env.set_var("SHARED", "local");

        assert_eq!(env.var("SHARED").as_deref(), Some("local"));
        assert_eq!(env.var("BASE_ONLY").as_deref(), Some("kept"));
    }

    #[test]
    fn writes_never_reach_the_base_provider() {
        let base = MemoryEnvironment::new();
        let observer = base.clone();
        let env = OverlayEnvironment::new(base);

        env.set_var("SECRET_TOKEN", "abc");

        assert_eq!(env.var("SECRET_TOKEN").as_deref(), Some("abc"));
        assert_eq!(observer.var("SECRET_TOKEN"), None);
    }
}
