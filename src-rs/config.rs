use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::llm::gemini_adapter::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_PROMPT};
use crate::tips::{DEFAULT_REFRESH_THRESHOLD, DEFAULT_REFRESH_TIMEOUT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_TOKEN must be set to a non-empty value")]
    MissingApiToken,
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub port: u16,
    pub api_token: String,
    pub gemini_api_keys: Vec<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub prompt: String,
    pub refresh_threshold: usize,
    pub refresh_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            api_token: String::new(),
            gemini_api_keys: Vec::new(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            gemini_model: DEFAULT_MODEL.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            refresh_threshold: DEFAULT_REFRESH_THRESHOLD,
            refresh_timeout: DEFAULT_REFRESH_TIMEOUT,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut cfg = Self::default();

        cfg.api_token = get("API_TOKEN").ok_or(ConfigError::MissingApiToken)?;
        if let Some(port) = get("PORT") {
            cfg.port = parse_number("PORT", &port)?;
        }
        cfg.gemini_api_keys = load_keys(&lookup, "GEMINI_API_KEY");
        if let Some(url) = get("GEMINI_BASE_URL") {
            cfg.gemini_base_url = url;
        }
        if let Some(model) = get("GEMINI_MODEL") {
            cfg.gemini_model = model;
        }
        if let Some(prompt) = get("TIP_PROMPT") {
            cfg.prompt = prompt;
        }
        if let Some(raw) = get("TIP_REFRESH_THRESHOLD") {
            let threshold: usize = parse_number("TIP_REFRESH_THRESHOLD", &raw)?;
            if threshold == 0 {
                return Err(ConfigError::Invalid {
                    key: "TIP_REFRESH_THRESHOLD",
                    value: raw,
                });
            }
            cfg.refresh_threshold = threshold;
        }
        if let Some(raw) = get("TIP_REFRESH_TIMEOUT_SECS") {
            let secs: u64 = parse_number("TIP_REFRESH_TIMEOUT_SECS", &raw)?;
            cfg.refresh_timeout = Duration::from_secs(secs.max(1));
        }
        Ok(cfg)
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse::<T>().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}

/// `PREFIX` may hold a comma separated list; `PREFIX_2` .. `PREFIX_10` add one key each.
fn load_keys<F>(lookup: &F, prefix: &str) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut keys = Vec::new();
    if let Some(raw) = lookup(prefix) {
        for item in raw.split(',') {
            let trimmed = item.trim();
            if !trimmed.is_empty() {
                keys.push(trimmed.to_string());
            }
        }
    }
    for idx in 2..=10 {
        if let Some(value) = lookup(&format!("{}_{}", prefix, idx)) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                keys.push(trimmed.to_string());
            }
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_token_is_set() {
        let cfg = ServiceConfig::from_lookup(lookup(&[("API_TOKEN", "secret")])).unwrap();
        assert_eq!(cfg.api_token, "secret");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.refresh_threshold, 5);
        assert_eq!(cfg.gemini_model, "gemini-2.0-flash");
        assert!(cfg.gemini_api_keys.is_empty());
    }

    #[test]
    fn missing_or_blank_token_is_rejected() {
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[])),
            Err(ConfigError::MissingApiToken)
        ));
        assert!(matches!(
            ServiceConfig::from_lookup(lookup(&[("API_TOKEN", "  ")])),
            Err(ConfigError::MissingApiToken)
        ));
    }

    #[test]
    fn reads_overrides() {
        let cfg = ServiceConfig::from_lookup(lookup(&[
            ("API_TOKEN", "t"),
            ("PORT", "8081"),
            ("GEMINI_MODEL", "gemini-2.5-flash"),
            ("TIP_REFRESH_THRESHOLD", "3"),
            ("TIP_REFRESH_TIMEOUT_SECS", "12"),
        ]))
        .unwrap();
        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.gemini_model, "gemini-2.5-flash");
        assert_eq!(cfg.refresh_threshold, 3);
        assert_eq!(cfg.refresh_timeout, Duration::from_secs(12));
    }

    #[test]
    fn bad_numbers_are_reported() {
        let err = ServiceConfig::from_lookup(lookup(&[("API_TOKEN", "t"), ("PORT", "http")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
        let err = ServiceConfig::from_lookup(lookup(&[
            ("API_TOKEN", "t"),
            ("TIP_REFRESH_THRESHOLD", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "TIP_REFRESH_THRESHOLD", .. }));
    }

    #[test]
    fn collects_comma_and_suffixed_keys() {
        let cfg = ServiceConfig::from_lookup(lookup(&[
            ("API_TOKEN", "t"),
            ("GEMINI_API_KEY", "k1, k2,,"),
            ("GEMINI_API_KEY_3", "k3"),
        ]))
        .unwrap();
        assert_eq!(cfg.gemini_api_keys, vec!["k1", "k2", "k3"]);
    }
}
