/// Engine configuration.
///
/// Read from `WINESTATS_*` environment variables or a JSON document. Every
/// field has a default, so a partial document or an empty environment is
/// valid.

use crate::aggregate::DEFAULT_TOP_FOODS;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_CACHE_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Length of the top food ranking.
    pub top_foods: usize,
    /// Clear downstream selection fields when an upstream one changes.
    pub reset_dependents: bool,
    /// Maximum number of cached bundles. 0 disables caching.
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            top_foods: DEFAULT_TOP_FOODS,
            reset_dependents: false,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = EngineConfig::default();
        EngineConfig {
            top_foods: parse_or("WINESTATS_TOP_FOODS", lookup("WINESTATS_TOP_FOODS"), defaults.top_foods),
            reset_dependents: lookup("WINESTATS_RESET_DEPENDENTS")
                .map(|raw| parse_flag(&raw, defaults.reset_dependents))
                .unwrap_or(defaults.reset_dependents),
            cache_capacity: parse_or(
                "WINESTATS_CACHE_CAPACITY",
                lookup("WINESTATS_CACHE_CAPACITY"),
                defaults.cache_capacity,
            ),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_top_foods(mut self, top_foods: usize) -> Self {
        self.top_foods = top_foods;
        self
    }

    pub fn with_reset_dependents(mut self, reset_dependents: bool) -> Self {
        self.reset_dependents = reset_dependents;
        self
    }

    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("ignoring {}={:?}, using {}", key, raw, default);
            default
        }),
    }
}

fn parse_flag(raw: &str, default: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" | "" => false,
        _ => {
            log::warn!("ignoring WINESTATS_RESET_DEPENDENTS={:?}, using {}", raw, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.top_foods, 5);
        assert!(!config.reset_dependents);
        assert_eq!(config.cache_capacity, 64);
        assert_eq!(EngineConfig::from_lookup(lookup(&[])), config);
    }

    #[test]
    fn test_lookup_overrides() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("WINESTATS_TOP_FOODS", " 3 "),
            ("WINESTATS_RESET_DEPENDENTS", "yes"),
            ("WINESTATS_CACHE_CAPACITY", "0"),
        ]));
        assert_eq!(config.top_foods, 3);
        assert!(config.reset_dependents);
        assert_eq!(config.cache_capacity, 0);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("WINESTATS_TOP_FOODS", "many"),
            ("WINESTATS_RESET_DEPENDENTS", "maybe"),
            ("WINESTATS_CACHE_CAPACITY", "-1"),
        ]));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(r#"{"top_foods": 10}"#).unwrap();
        assert_eq!(config.top_foods, 10);
        assert_eq!(config.cache_capacity, 64);

        assert!(EngineConfig::from_json("{not json").is_err());
    }
}
