use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf};

use crate::error::UvError;

pub const API_KEY_VAR: &str = "NIWA_API_KEY";
pub const API_SECRET_VAR: &str = "NIWA_API_SECRET";
pub const API_URL_VAR: &str = "NIWA_API_URL";

/// NIWA access settings.
///
/// Example TOML:
/// api_key = "..."
/// api_secret = "..."
/// api_url = "https://api.niwa.co.nz/uv/data"
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub api_url: Option<String>,
}

/// Validated settings, all present and non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    /// Required but never sent upstream.
    pub api_secret: String,
    pub api_url: String,
}

impl Config {
    /// Config file layered under the process environment.
    pub fn resolve() -> Result<Self> {
        let mut cfg = Self::load()?;
        cfg.apply_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = match Self::config_file_path() {
            Ok(path) => path,
            Err(err) => {
                // No home directory, e.g. inside a Lambda sandbox.
                tracing::debug!("skipping config file: {err}");
                return Ok(Self::default());
            }
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("nz", "niwa-uv", "niwa-uv")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Replace values with whatever `lookup` returns for the NIWA variables.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(API_KEY_VAR) {
            self.api_key = Some(v);
        }
        if let Some(v) = lookup(API_SECRET_VAR) {
            self.api_secret = Some(v);
        }
        if let Some(v) = lookup(API_URL_VAR) {
            self.api_url = Some(v);
        }
    }

    /// Fails on the first missing or empty value.
    pub fn credentials(&self) -> Result<Credentials, UvError> {
        Ok(Credentials {
            api_key: required(&self.api_key, API_KEY_VAR)?,
            api_secret: required(&self.api_secret, API_SECRET_VAR)?,
            api_url: required(&self.api_url, API_URL_VAR)?,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.credentials().is_ok()
    }
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, UvError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(UvError::MissingConfig(name)),
    }
}

fn redact(value: &Option<String>) -> &'static str {
    if value.is_some() { "<set>" } else { "<unset>" }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full() -> Config {
        Config {
            api_key: Some("KEY".into()),
            api_secret: Some("SECRET".into()),
            api_url: Some("https://example.test/uv".into()),
        }
    }

    #[test]
    fn credentials_error_when_nothing_set() {
        let err = Config::default().credentials().unwrap_err();
        assert!(matches!(err, UvError::MissingConfig(API_KEY_VAR)));
    }

    #[test]
    fn credentials_report_first_missing_value() {
        let mut cfg = full();
        cfg.api_secret = None;
        let err = cfg.credentials().unwrap_err();
        assert!(matches!(err, UvError::MissingConfig(API_SECRET_VAR)));

        let mut cfg = full();
        cfg.api_url = Some("   ".into());
        let err = cfg.credentials().unwrap_err();
        assert!(matches!(err, UvError::MissingConfig(API_URL_VAR)));
    }

    #[test]
    fn credentials_when_complete() {
        let creds = full().credentials().expect("config is complete");
        assert_eq!(creds.api_key, "KEY");
        assert_eq!(creds.api_url, "https://example.test/uv");
        assert!(full().is_complete());
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> =
            HashMap::from([(API_KEY_VAR, "ENV_KEY"), (API_URL_VAR, "https://env.test")]);

        let mut cfg = full();
        cfg.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(cfg.api_key.as_deref(), Some("ENV_KEY"));
        assert_eq!(cfg.api_secret.as_deref(), Some("SECRET"));
        assert_eq!(cfg.api_url.as_deref(), Some("https://env.test"));
    }

    #[test]
    fn toml_roundtrip_keeps_unset_fields_unset() {
        let mut cfg = full();
        cfg.api_secret = None;

        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let rendered = format!("{:?} {:?}", full(), full().credentials().unwrap());
        assert!(!rendered.contains("KEY"));
        assert!(!rendered.contains("SECRET"));
        assert!(rendered.contains("https://example.test/uv"));
    }
}
