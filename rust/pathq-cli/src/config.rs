use std::env;

use anyhow::Context;
use pathq_core::{SearchOptions, UpdatePolicy};

/// Search defaults taken from the environment. Command-line flags win.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub timeout_ms: Option<f64>,
    pub update_policy: Option<UpdatePolicy>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_ms = lookup("PATHQ_TIMEOUT_MS")
            .map(|s| s.trim().parse::<f64>())
            .transpose()
            .context("PATHQ_TIMEOUT_MS is not a number")?;
        let update_policy = lookup("PATHQ_UPDATE_POLICY")
            .map(|s| s.parse::<UpdatePolicy>())
            .transpose()
            .context("PATHQ_UPDATE_POLICY")?;
        Ok(Self {
            timeout_ms,
            update_policy,
        })
    }

    pub fn search_options(
        &self,
        timeout_ms: Option<f64>,
        update_policy: Option<UpdatePolicy>,
    ) -> SearchOptions {
        SearchOptions {
            timeout_ms: timeout_ms.or(self.timeout_ms),
            update_policy: update_policy.or(self.update_policy).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.search_options(None, None), SearchOptions::default());
    }

    #[test]
    fn reads_timeout_and_policy() {
        let cfg = Config::from_lookup(lookup(&[
            ("PATHQ_TIMEOUT_MS", "150"),
            ("PATHQ_UPDATE_POLICY", "stale"),
        ]))
        .unwrap();
        assert_eq!(cfg.timeout_ms, Some(150.0));
        assert_eq!(cfg.update_policy, Some(UpdatePolicy::Stale));
    }

    #[test]
    fn flags_override_environment() {
        let cfg = Config {
            timeout_ms: Some(150.0),
            update_policy: Some(UpdatePolicy::Stale),
        };
        let opts = cfg.search_options(Some(10.0), Some(UpdatePolicy::Reinsert));
        assert_eq!(opts.timeout_ms, Some(10.0));
        assert_eq!(opts.update_policy, UpdatePolicy::Reinsert);
    }

    #[test]
    fn rejects_garbage_values() {
        assert!(Config::from_lookup(lookup(&[("PATHQ_TIMEOUT_MS", "soon")])).is_err());
        let err = Config::from_lookup(lookup(&[("PATHQ_UPDATE_POLICY", "lazy")])).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown update policy"));
    }
}
