use super::channel::NotificationsConfig;

/// Routing-key entry that always exists as the last candidate.
pub const DEFAULT_KEY: &str = "default";

/// Which routing rule selected the targets for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    /// A `business_domains` entry matched this key.
    Domain(String),
    /// No candidate key existed; top-level `default_channels` applied.
    DefaultChannels,
    /// Nothing matched and no defaults are configured.
    None,
}

/// Candidate registry keys for a routing key, most specific first.
///
/// `"finance.payroll.alerts"` yields `finance.payroll.alerts`,
/// `finance.payroll`, `finance`, `default`. The empty key yields only
/// `default`.
pub fn candidate_keys(routing_key: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if !routing_key.is_empty() {
        let segments: Vec<&str> = routing_key.split('.').collect();
        for len in (1..=segments.len()).rev() {
            keys.push(segments[..len].join("."));
        }
    }
    keys.push(DEFAULT_KEY.to_string());
    keys
}

/// Resolve a routing key to channel ids.
///
/// The first candidate key *present* in `business_domains` wins, even when
/// its list is empty: an explicit empty entry mutes that key rather than
/// falling through to a broader one. Only when no candidate exists at all do
/// the top-level `default_channels` apply.
pub fn resolve_route(config: &NotificationsConfig, routing_key: &str) -> (Vec<String>, RouteMatch) {
    for key in candidate_keys(routing_key) {
        if let Some(ids) = config.business_domains.get(&key) {
            return (ids.clone(), RouteMatch::Domain(key));
        }
    }
    if config.default_channels.is_empty() {
        (Vec::new(), RouteMatch::None)
    } else {
        (config.default_channels.clone(), RouteMatch::DefaultChannels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(text: &str) -> NotificationsConfig {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn candidates_run_from_specific_to_default() {
        assert_eq!(
            candidate_keys("finance.payroll.alerts"),
            ["finance.payroll.alerts", "finance.payroll", "finance", "default"]
        );
        assert_eq!(candidate_keys("tech"), ["tech", "default"]);
        assert_eq!(candidate_keys(""), ["default"]);
    }

    #[test]
    fn exact_key_wins_over_parent() {
        let cfg = config(
            "business_domains:\n  finance: [cfo_room]\n  finance.payroll: [payroll_room]\n",
        );
        let (ids, matched) = resolve_route(&cfg, "finance.payroll");
        assert_eq!(ids, ["payroll_room"]);
        assert_eq!(matched, RouteMatch::Domain("finance.payroll".to_string()));
    }

    #[test]
    fn falls_back_to_parent_then_default_key() {
        let cfg = config(
            "business_domains:\n  finance: [cfo_room]\n  default: [ops_room]\n",
        );
        let (ids, _) = resolve_route(&cfg, "finance.payroll.alerts");
        assert_eq!(ids, ["cfo_room"]);

        let (ids, matched) = resolve_route(&cfg, "marketing.growth");
        assert_eq!(ids, ["ops_room"]);
        assert_eq!(matched, RouteMatch::Domain("default".to_string()));
    }

    #[test]
    fn empty_entry_mutes_instead_of_falling_through() {
        let cfg = config(
            "default_channels: [catchall]\nbusiness_domains:\n  finance: [cfo_room]\n  finance.payroll: []\n",
        );
        let (ids, matched) = resolve_route(&cfg, "finance.payroll");
        assert!(ids.is_empty());
        assert_eq!(matched, RouteMatch::Domain("finance.payroll".to_string()));
    }

    #[test]
    fn default_channels_apply_only_without_any_match() {
        let cfg = config("default_channels: [catchall]\n");
        let (ids, matched) = resolve_route(&cfg, "risk.fraud");
        assert_eq!(ids, ["catchall"]);
        assert_eq!(matched, RouteMatch::DefaultChannels);
    }

    #[test]
    fn nothing_configured_resolves_to_no_targets() {
        let (ids, matched) = resolve_route(&NotificationsConfig::default(), "tech");
        assert!(ids.is_empty());
        assert_eq!(matched, RouteMatch::None);
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn candidates_are_shrinking_dot_prefixes(
            segments in prop::collection::vec("[a-z]{1,6}", 1..5)
        ) {
            let key = segments.join(".");
            let candidates = candidate_keys(&key);

            prop_assert_eq!(candidates.len(), segments.len() + 1);
            prop_assert_eq!(candidates.first().map(String::as_str), Some(key.as_str()));
            prop_assert_eq!(candidates.last().map(String::as_str), Some(DEFAULT_KEY));
            for pair in candidates[..candidates.len() - 1].windows(2) {
                prop_assert!(pair[0].len() > pair[1].len());
                prop_assert!(key.starts_with(pair[1].as_str()));
            }
        }

        #[test]
        fn first_present_candidate_always_wins(
            segments in prop::collection::vec("[a-z]{1,6}", 1..5),
            present_len in 1usize..5,
        ) {
            prop_assume!(present_len <= segments.len());
            let key = segments.join(".");
            let present = segments[..present_len].join(".");

            let mut cfg = NotificationsConfig::default();
            cfg.business_domains.insert(present.clone(), vec!["room".to_string()]);

            let (ids, matched) = resolve_route(&cfg, &key);
            prop_assert_eq!(ids, vec!["room".to_string()]);
            prop_assert_eq!(matched, RouteMatch::Domain(present));
        }
    }
}
