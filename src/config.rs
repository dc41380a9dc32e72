//! Credentials and client settings.
//!
//! The file is TOML with `secret`, `api_key` and `keep_strings` required.
//! `ONESKY_SECRET` and `ONESKY_API_KEY` replace the file's values when set
//! to something non-empty.
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::language::LanguageMappings;

pub const DEFAULT_CONFIG_FILE: &str = "onesky_keys.toml";
pub const DEFAULT_BASE_URL: &str = "https://platform.api.onesky.io";
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

pub const CONFIG_ENV: &str = "ONESKY_CONFIG";
pub const SECRET_ENV: &str = "ONESKY_SECRET";
pub const API_KEY_ENV: &str = "ONESKY_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub secret: String,
    pub api_key: String,
    pub keep_strings: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub proxy: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub language_mappings: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    /// Config file path: explicit flag, then `ONESKY_CONFIG`, then the default name.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| Error::ConfigurationMissing {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&data).map_err(|source| Error::ConfigurationInvalid {
            path: path.to_path_buf(),
            source,
        })?;
        config.apply_overrides(
            std::env::var(SECRET_ENV).ok(),
            std::env::var(API_KEY_ENV).ok(),
        );
        log::debug!("loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn parse(data: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(data)
    }

    fn apply_overrides(&mut self, secret: Option<String>, api_key: Option<String>) {
        if let Some(secret) = secret.filter(|s| !s.is_empty()) {
            self.secret = secret;
        }
        if let Some(api_key) = api_key.filter(|k| !k.is_empty()) {
            self.api_key = api_key;
        }
    }

    pub fn language_mappings(&self) -> LanguageMappings {
        LanguageMappings::with_extra(&self.language_mappings)
    }
}
