//! Fire-and-forget notification routing and delivery.

use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::Client;
use serde::Serialize;
use serde_yaml::Value;
use url::Url;

use crate::domain::notify::{ChannelSpec, Level, NotificationsConfig, RouteMatch, resolve_route};
use crate::domain::EffectiveConfig;
use crate::ports::{Environment, ProcessEnvironment};

const DISPATCH_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_BOT_API_BASE: &str = "https://api.telegram.org";

/// Routes events to configured channels. Never returns an error: every
/// failure mode is logged and delivery continues with the next channel,
/// because a dead chat endpoint must not take the job that noticed a
/// problem down with it.
pub struct Notifier<E: Environment = ProcessEnvironment> {
    notifications: NotificationsConfig,
    env: E,
    client: Option<Client>,
}

impl Notifier {
    /// Notifier over the `notifications` section of an effective
    /// configuration, resolving `${NAME}` fields from the process
    /// environment.
    pub fn new(config: &EffectiveConfig) -> Self {
        Self::with_environment(config, ProcessEnvironment)
    }
}

impl<E: Environment> Notifier<E> {
    pub fn with_environment(config: &EffectiveConfig, env: E) -> Self {
        let notifications = match config.subtree("notifications") {
            Some(section) => match serde_yaml::from_value(Value::Mapping(section.clone())) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!("notifications config malformed, falling back to console only: {err}");
                    NotificationsConfig::default()
                }
            },
            None => NotificationsConfig::default(),
        };
        let client = match Client::builder().timeout(DISPATCH_TIMEOUT).build() {
            Ok(client) => Some(client),
            Err(err) => {
                warn!("HTTP client unavailable, remote delivery disabled: {err}");
                None
            }
        };
        Self { notifications, env, client }
    }

    /// Send one event: echo to the console, resolve the routing key, then
    /// deliver to each target channel in order.
    pub fn send(&self, title: &str, message: &str, level: Level, routing_key: &str) {
        println!("\n[{level}] notification ({routing_key}): {title}\n{message}\n");

        let (channel_ids, matched) = resolve_route(&self.notifications, routing_key);
        if channel_ids.is_empty() {
            match matched {
                RouteMatch::Domain(key) => {
                    debug!("routing key '{routing_key}' muted by empty entry '{key}'");
                }
                _ => debug!("no channels configured for routing key '{routing_key}'"),
            }
            return;
        }
        let label = match &matched {
            RouteMatch::Domain(key) => key.as_str(),
            RouteMatch::DefaultChannels => "default_channels",
            RouteMatch::None => return,
        };
        println!("   -> routing key '{routing_key}' resolved via '{label}' -> {channel_ids:?}");

        for channel_id in &channel_ids {
            match self.notifications.channels.get(channel_id) {
                Some(raw) => self.dispatch(channel_id, raw, title, message),
                None => warn!("notification channel '{channel_id}' is not defined, skipping"),
            }
        }
    }

    fn dispatch(&self, channel_id: &str, raw: &Value, title: &str, message: &str) {
        let spec: ChannelSpec = match serde_yaml::from_value(raw.clone()) {
            Ok(spec) => spec,
            Err(err) => {
                warn!("notification channel '{channel_id}' has an invalid descriptor, skipping: {err}");
                return;
            }
        };
        match spec {
            ChannelSpec::WebhookChat { url } => {
                self.send_webhook(channel_id, &url, title, message);
            }
            ChannelSpec::BotChat { token, chat_id, api_base } => {
                self.send_bot(channel_id, &token, &chat_id, api_base.as_deref(), title, message);
            }
        }
    }

    fn send_webhook(&self, channel_id: &str, url_field: &str, title: &str, message: &str) {
        let url = self.resolve_field(url_field);
        if url.is_empty() {
            warn!("channel '{channel_id}': webhook url is empty (raw: '{url_field}'), skipping");
            return;
        }
        let url = match Url::parse(&url) {
            Ok(url) => url,
            Err(err) => {
                warn!("channel '{channel_id}': webhook url is invalid, skipping: {err}");
                return;
            }
        };
        debug!("channel '{channel_id}': posting to {}...", truncate(url.as_str(), 30));
        let payload = WebhookPayload {
            msg_type: "text",
            content: WebhookContent { text: format!("[{title}]\n{message}") },
        };
        self.post_json(channel_id, url, &payload);
    }

    fn send_bot(
        &self,
        channel_id: &str,
        token_field: &str,
        chat_id_field: &str,
        api_base: Option<&str>,
        title: &str,
        message: &str,
    ) {
        let token = self.resolve_field(token_field);
        let chat_id = self.resolve_field(chat_id_field);
        if token.is_empty() || chat_id.is_empty() {
            warn!("channel '{channel_id}': bot token or chat id is empty, skipping");
            return;
        }
        let base = api_base.unwrap_or(DEFAULT_BOT_API_BASE).trim_end_matches('/').to_string();
        let url = match Url::parse(&format!("{base}/bot{token}/sendMessage")) {
            Ok(url) => url,
            Err(err) => {
                warn!("channel '{channel_id}': bot api url is invalid, skipping: {err}");
                return;
            }
        };
        let payload = BotPayload {
            chat_id,
            text: format!("*{title}*\n{message}"),
            parse_mode: "Markdown",
        };
        self.post_json(channel_id, url, &payload);
    }

    fn post_json<T: Serialize>(&self, channel_id: &str, url: Url, payload: &T) {
        let Some(client) = &self.client else {
            warn!("channel '{channel_id}': HTTP client unavailable, skipping");
            return;
        };
        match client.post(url).json(payload).send() {
            Ok(resp) if resp.status().is_success() => {
                debug!("channel '{channel_id}' delivered");
            }
            Ok(resp) => {
                warn!("channel '{channel_id}' delivery failed: HTTP {}", resp.status());
            }
            Err(err) => {
                warn!("channel '{channel_id}' delivery failed: {err}");
            }
        }
    }

    /// A field written exactly as `${NAME}` defers to the environment;
    /// unset variables resolve to the empty string, unlike layer
    /// interpolation, so a missing secret skips the channel instead of
    /// leaking the token name to a remote endpoint.
    fn resolve_field(&self, value: &str) -> String {
        match value.strip_prefix("${").and_then(|v| v.strip_suffix('}')) {
            Some(name) => self.env.var(name).unwrap_or_default(),
            None => value.to_string(),
        }
    }
}

#[derive(Serialize)]
struct WebhookPayload {
    msg_type: &'static str,
    content: WebhookContent,
}

#[derive(Serialize)]
struct WebhookContent {
    text: String,
}

#[derive(Serialize)]
struct BotPayload {
    chat_id: String,
    text: String,
    parse_mode: &'static str,
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
