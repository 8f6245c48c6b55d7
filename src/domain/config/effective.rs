use serde::{Serialize, Serializer};
use serde_yaml::{Mapping, Value};

/// Key the resolver injects resolution provenance under.
pub const META_KEY: &str = "_meta";

/// The merged configuration for one (region, app, env) identity.
///
/// Structurally this is a plain YAML mapping; the wrapper adds dotted-path
/// lookups and keeps merge semantics in one place. It serializes as the
/// underlying mapping, so rendering to YAML or JSON needs no conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveConfig {
    root: Mapping,
}

impl EffectiveConfig {
    pub fn new(root: Mapping) -> Self {
        Self { root }
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.root
    }

    pub fn into_mapping(self) -> Mapping {
        self.root
    }

    /// Look up a value by dotted path, e.g. `"database.host"`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut map = &self.root;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            let value = map.get(segment)?;
            if segments.peek().is_none() {
                return Some(value);
            }
            map = value.as_mapping()?;
        }
        None
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path)?.as_str()
    }

    /// Like [`get_str`](Self::get_str) but coerces scalar numbers and bools,
    /// for fields that are written unquoted in YAML.
    pub fn get_string(&self, path: &str) -> Option<String> {
        match self.get(path)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Top-level mapping under `key`, if present and actually a mapping.
    pub fn subtree(&self, key: &str) -> Option<&Mapping> {
        self.root.get(key)?.as_mapping()
    }

    /// Resolution provenance injected by the resolver.
    pub fn meta(&self) -> Option<&Mapping> {
        self.subtree(META_KEY)
    }
}

impl From<Mapping> for EffectiveConfig {
    fn from(root: Mapping) -> Self {
        Self::new(root)
    }
}

impl Serialize for EffectiveConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}
