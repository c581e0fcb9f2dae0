use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::SearchError;

/// What the search does when a cheaper route to a frontier node is found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePolicy {
    /// Push a fresh heap entry carrying the improved priority. The outdated
    /// entry stays in the heap and is skipped when it surfaces.
    #[default]
    Reinsert,
    /// Update the node in place and leave the heap untouched. The node keeps
    /// its original position in the expansion order.
    Stale,
}

impl FromStr for UpdatePolicy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reinsert" => Ok(UpdatePolicy::Reinsert),
            "stale" => Ok(UpdatePolicy::Stale),
            other => Err(SearchError::UnknownPolicy(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Wall-clock budget for one search call. `None` means unbounded.
    pub timeout_ms: Option<f64>,
    pub update_policy: UpdatePolicy,
}

impl SearchOptions {
    pub fn with_timeout_ms(mut self, timeout_ms: f64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_update_policy(mut self, policy: UpdatePolicy) -> Self {
        self.update_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        match self.timeout_ms {
            Some(ms) if ms.is_nan() => Err(SearchError::InvalidTimeout(ms)),
            _ => Ok(()),
        }
    }

    /// The timeout as a `Duration`; `None` when unbounded. A negative
    /// budget is already spent and maps to `Duration::ZERO`. Call `validate`
    /// first, NaN maps to `None` here.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms
            .filter(|ms| !ms.is_nan())
            .and_then(|ms| Duration::try_from_secs_f64(ms.max(0.0) / 1000.0).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_are_unbounded_and_reinsert() {
        let o = SearchOptions::default();
        assert_eq!(o.timeout_ms, None);
        assert_eq!(o.timeout(), None);
        assert_eq!(o.update_policy, UpdatePolicy::Reinsert);
        assert!(o.validate().is_ok());
    }

    #[test]
    fn rejects_nan_timeout() {
        let o = SearchOptions::default().with_timeout_ms(f64::NAN);
        assert!(matches!(o.validate(), Err(SearchError::InvalidTimeout(_))));
        assert_eq!(o.timeout(), None);
    }

    #[test]
    fn negative_timeout_is_an_exhausted_budget() {
        let o = SearchOptions::default().with_timeout_ms(-5.0);
        assert!(o.validate().is_ok());
        assert_eq!(o.timeout(), Some(Duration::ZERO));
        let o = SearchOptions::default().with_timeout_ms(f64::NEG_INFINITY);
        assert!(o.validate().is_ok());
        assert_eq!(o.timeout(), Some(Duration::ZERO));
    }

    #[test]
    fn infinite_timeout_is_unbounded() {
        let o = SearchOptions::default().with_timeout_ms(f64::INFINITY);
        assert!(o.validate().is_ok());
        assert_eq!(o.timeout(), None);
        let o = SearchOptions::default().with_timeout_ms(250.0);
        assert_eq!(o.timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("Stale".parse::<UpdatePolicy>(), Ok(UpdatePolicy::Stale));
        assert_eq!(" reinsert ".parse::<UpdatePolicy>(), Ok(UpdatePolicy::Reinsert));
        assert_eq!("lazy".parse::<UpdatePolicy>(), Err(SearchError::UnknownPolicy("lazy".into())));
    }

    #[test]
    fn deserializes_with_defaults_when_missing_fields() {
        let o: SearchOptions = serde_json::from_value(json!({ "timeout_ms": 1500 })).unwrap();
        assert_eq!(o.timeout_ms, Some(1500.0));
        assert_eq!(o.update_policy, UpdatePolicy::Reinsert);

        let o: SearchOptions = serde_json::from_value(json!({ "update_policy": "stale" })).unwrap();
        assert_eq!(o.timeout_ms, None);
        assert_eq!(o.update_policy, UpdatePolicy::Stale);
    }
}
