use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde_yaml::Value;

/// Severity attached to an event. Controls only how the event is labelled,
/// never where it is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Info, Level::Warning, Level::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }

    pub fn from_name(name: &str) -> Option<Level> {
        Level::ALL.iter().find(|l| l.as_str().eq_ignore_ascii_case(name)).copied()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A delivery endpoint descriptor, discriminated by its `type` field.
///
/// Connection fields may be written as `${NAME}` to defer to an environment
/// variable at send time, keeping tokens out of checked-in config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ChannelSpec {
    /// Incoming-webhook group chat. One POST per event.
    #[serde(rename = "webhook_chat")]
    WebhookChat { url: String },

    /// Bot-API chat (token + chat id in the request path/body).
    #[serde(rename = "bot_chat")]
    BotChat {
        token: String,
        chat_id: String,
        #[serde(default)]
        api_base: Option<String>,
    },
}

/// The `notifications` subtree of an effective configuration.
///
/// Channels are kept as raw YAML values and decoded individually at dispatch
/// time, so one malformed descriptor cannot take the whole registry down
/// with it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    pub default_channels: Vec<String>,
    pub channels: BTreeMap<String, Value>,
    pub business_domains: BTreeMap<String, Vec<String>>,
}
