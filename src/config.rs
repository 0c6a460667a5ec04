//! Detector configuration
//!
//! Defaults suit local development. `from_env` overrides them from
//! environment variables, `load` from a JSON file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Base URL of the detection/community backend
    pub api_base_url: String,

    /// Replace failed detections with synthetic results.
    ///
    /// When true, backend outages are hidden behind plausible fake data;
    /// disable wherever reporting the failure matters more than always
    /// showing a result. Plant-verification failures propagate either way.
    pub allow_synthetic_fallback: bool,

    /// Per-request timeout; None waits indefinitely
    pub request_timeout_secs: Option<u64>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            allow_synthetic_fallback: true,
            request_timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl DetectorConfig {
    /// Load configuration from a JSON file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: DetectorConfig = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse config JSON")?;
        Ok(config)
    }

    /// Build configuration from environment variables
    ///
    /// - `AGRISPHERE_API_URL`: backend base URL
    /// - `AGRISPHERE_SYNTHETIC_FALLBACK`: "true"/"false" (also 1/0)
    /// - `AGRISPHERE_TIMEOUT_SECS`: request timeout, 0 disables it
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("AGRISPHERE_API_URL") {
            config.api_base_url = url;
        }

        if let Some(flag) = lookup("AGRISPHERE_SYNTHETIC_FALLBACK") {
            config.allow_synthetic_fallback = parse_flag(&flag)
                .with_context(|| format!("Invalid AGRISPHERE_SYNTHETIC_FALLBACK: '{}'", flag))?;
        }

        if let Some(secs) = lookup("AGRISPHERE_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid AGRISPHERE_TIMEOUT_SECS: '{}'", secs))?;
            config.request_timeout_secs = (secs > 0).then_some(secs);
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("expected true or false"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DetectorConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, DetectorConfig::default());
        assert!(config.allow_synthetic_fallback);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_env_overrides() {
        let config = DetectorConfig::from_lookup(lookup_from(&[
            ("AGRISPHERE_API_URL", "http://backend:9000"),
            ("AGRISPHERE_SYNTHETIC_FALLBACK", "false"),
            ("AGRISPHERE_TIMEOUT_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "http://backend:9000");
        assert!(!config.allow_synthetic_fallback);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_invalid_flag() {
        let err = DetectorConfig::from_lookup(lookup_from(&[("AGRISPHERE_SYNTHETIC_FALLBACK", "maybe")]));
        assert!(err.is_err());
    }

    #[test]
    fn test_partial_json() {
        let config: DetectorConfig =
            serde_json::from_str(r#"{"allow_synthetic_fallback": false}"#).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert!(!config.allow_synthetic_fallback);
    }
}
