//! Configuration loading.
//!
//! Defaults, overlaid by an optional TOML file at
//! `$XDG_CONFIG_HOME/skillscout/config.toml` (or an explicit `--config`
//! path), overlaid by `SKILLSCOUT_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::discovery::controller::DiscoverySettings;
use crate::error::{Result, ScoutError};
use crate::service::{MAX_PAGE_SIZE, MAX_SEARCH_LIMIT};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the SkillSwap directory API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Browse page size (service accepts 1..=50).
    pub page_size: u32,
    /// Search result limit (service accepts 1..=100).
    pub search_limit: u32,
    /// Quiet window after the last keystroke before a search fires.
    pub debounce_ms: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            search_limit: 20,
            debounce_ms: 300,
        }
    }
}

impl Config {
    /// Load configuration, merging file and environment overrides onto the
    /// defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SKILLSCOUT_CONFIG").ok().map(PathBuf::from));

        let path = explicit.or_else(|| {
            dirs::config_dir().map(|dir| dir.join("skillscout/config.toml"))
        });
        if let Some(path) = path {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config patch from TOML text.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let mut config = Self::default();
        let patch: ConfigPatch = toml::from_str(raw)
            .map_err(|err| ScoutError::Config(format!("parse config: {err}")))?;
        config.merge_patch(patch);
        config.validate()?;
        Ok(config)
    }

    /// Controller settings derived from this config.
    #[must_use]
    pub const fn discovery_settings(&self) -> DiscoverySettings {
        DiscoverySettings {
            page_size: self.discovery.page_size,
            search_limit: self.discovery.search_limit,
            debounce: Duration::from_millis(self.discovery.debounce_ms),
        }
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| ScoutError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| ScoutError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(service) = patch.service {
            if let Some(base_url) = service.base_url {
                self.service.base_url = base_url;
            }
            if let Some(timeout_secs) = service.timeout_secs {
                self.service.timeout_secs = timeout_secs;
            }
        }
        if let Some(discovery) = patch.discovery {
            if let Some(page_size) = discovery.page_size {
                self.discovery.page_size = page_size;
            }
            if let Some(search_limit) = discovery.search_limit {
                self.discovery.search_limit = search_limit;
            }
            if let Some(debounce_ms) = discovery.debounce_ms {
                self.discovery.debounce_ms = debounce_ms;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("SKILLSCOUT_BASE_URL") {
            self.service.base_url = value;
        }
        if let Some(value) = env_u64("SKILLSCOUT_TIMEOUT_SECS")? {
            self.service.timeout_secs = value;
        }
        if let Some(value) = env_u32("SKILLSCOUT_PAGE_SIZE")? {
            self.discovery.page_size = value;
        }
        if let Some(value) = env_u32("SKILLSCOUT_SEARCH_LIMIT")? {
            self.discovery.search_limit = value;
        }
        if let Some(value) = env_u64("SKILLSCOUT_DEBOUNCE_MS")? {
            self.discovery.debounce_ms = value;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.service.base_url.trim().is_empty() {
            return Err(ScoutError::Config("service.base_url is empty".to_string()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.discovery.page_size) {
            return Err(ScoutError::Config(format!(
                "discovery.page_size must be in [1, {MAX_PAGE_SIZE}], got {}",
                self.discovery.page_size
            )));
        }
        if !(1..=MAX_SEARCH_LIMIT).contains(&self.discovery.search_limit) {
            return Err(ScoutError::Config(format!(
                "discovery.search_limit must be in [1, {MAX_SEARCH_LIMIT}], got {}",
                self.discovery.search_limit
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    service: Option<ServicePatch>,
    discovery: Option<DiscoveryPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ServicePatch {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct DiscoveryPatch {
    page_size: Option<u32>,
    search_limit: Option<u32>,
    debounce_ms: Option<u64>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_u32(key: &str) -> Result<Option<u32>> {
    env_string(key)
        .map(|v| {
            v.parse()
                .map_err(|_| ScoutError::Config(format!("{key} must be an integer, got '{v}'")))
        })
        .transpose()
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    env_string(key)
        .map(|v| {
            v.parse()
                .map_err(|_| ScoutError::Config(format!("{key} must be an integer, got '{v}'")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.service.base_url, "http://localhost:8000");
        assert_eq!(config.discovery.page_size, 12);
        assert_eq!(config.discovery.search_limit, 20);
        assert_eq!(config.discovery.debounce_ms, 300);
    }

    #[test]
    fn test_partial_patch_merges_over_defaults() {
        let config = Config::from_toml(
            r#"
            [service]
            base_url = "https://swap.example.org"

            [discovery]
            debounce_ms = 150
            "#,
        )
        .unwrap();

        assert_eq!(config.service.base_url, "https://swap.example.org");
        assert_eq!(config.service.timeout_secs, 10);
        assert_eq!(config.discovery.page_size, 12);
        assert_eq!(config.discovery.debounce_ms, 150);
    }

    #[test]
    fn test_out_of_range_page_size_rejected() {
        let err = Config::from_toml("[discovery]\npage_size = 51\n").unwrap_err();
        assert!(matches!(err, ScoutError::Config(_)));

        let err = Config::from_toml("[discovery]\npage_size = 0\n").unwrap_err();
        assert!(matches!(err, ScoutError::Config(_)));
    }

    #[test]
    fn test_discovery_settings_conversion() {
        let config = Config::from_toml("[discovery]\ndebounce_ms = 250\n").unwrap();
        let settings = config.discovery_settings();
        assert_eq!(settings.debounce, Duration::from_millis(250));
        assert_eq!(settings.page_size, 12);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = Config::from_toml("not [valid").unwrap_err();
        assert!(matches!(err, ScoutError::Config(_)));
    }
}
