use std::fmt;

use super::AppError;

/// Key/value detail block a job reports on completion. Values are free-form
/// JSON so jobs can record counts, flags, or nested structures.
pub type JobSummary = serde_json::Map<String, serde_json::Value>;

/// The sanctioned business domains a job can belong to.
///
/// A domain is the first segment of a job's routing key and the top-level
/// directory its outputs land under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Operations,
    Marketing,
    Risk,
    Finance,
    Tech,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::Operations,
        Domain::Marketing,
        Domain::Risk,
        Domain::Finance,
        Domain::Tech,
    ];

    /// Directory and routing-key segment for this domain.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Domain::Operations => "operations",
            Domain::Marketing => "marketing",
            Domain::Risk => "risk",
            Domain::Finance => "finance",
            Domain::Tech => "tech",
        }
    }

    pub fn from_name(name: &str) -> Result<Domain, AppError> {
        Domain::ALL
            .iter()
            .find(|d| d.dir_name() == name)
            .copied()
            .ok_or_else(|| AppError::UnknownDomain(name.to_string()))
    }

    /// Routing key for this domain, extended with a sub-domain when present.
    pub fn routing_key(&self, sub_domain: Option<&str>) -> String {
        match sub_domain {
            Some(sub) if !sub.is_empty() => format!("{}.{}", self.dir_name(), sub),
            _ => self.dir_name().to_string(),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_round_trips_all_domains() {
        for domain in Domain::ALL {
            assert_eq!(Domain::from_name(domain.dir_name()).unwrap(), domain);
        }
    }

    #[test]
    fn from_name_rejects_unknown() {
        let err = Domain::from_name("sales").unwrap_err();
        assert!(err.to_string().contains("sales"));
    }

    #[test]
    fn from_name_is_case_sensitive() {
        assert!(Domain::from_name("Finance").is_err());
    }

    #[test]
    fn routing_key_includes_sub_domain() {
        assert_eq!(Domain::Finance.routing_key(Some("accounting")), "finance.accounting");
        assert_eq!(Domain::Finance.routing_key(None), "finance");
        assert_eq!(Domain::Finance.routing_key(Some("")), "finance");
    }
}
