//! Server configuration read from the environment.
//!
//! Every variable is optional. `from_env` is a thin wrapper over
//! `from_lookup` so parsing can be tested without touching process env.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPLOAD_DIR: &str = "public/uploads";
pub const DEFAULT_UPLOAD_URL_PREFIX: &str = "/uploads";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("UPLOAD_URL_PREFIX must start with '/' and name a sub-path, got {0:?}")]
    UploadPrefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub upload_dir: PathBuf,
    /// URL path uploaded files are served under, without trailing slash.
    pub upload_url_prefix: String,
    /// Load the built-in sample catalog at startup.
    pub seed_catalog: bool,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            upload_url_prefix: DEFAULT_UPLOAD_URL_PREFIX.to_owned(),
            seed_catalog: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Read `PORT`, `UPLOAD_DIR`, `UPLOAD_URL_PREFIX`, `SEED_CATALOG` and
    /// `MAX_UPLOAD_BYTES`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = parse_var(&lookup, "PORT", defaults.port)?;
        let upload_dir = lookup("UPLOAD_DIR").map_or(defaults.upload_dir, PathBuf::from);
        let upload_url_prefix = match lookup("UPLOAD_URL_PREFIX") {
            Some(raw) => parse_prefix(&raw)?,
            None => defaults.upload_url_prefix,
        };
        let seed_catalog = match lookup("SEED_CATALOG") {
            Some(raw) => parse_bool("SEED_CATALOG", &raw)?,
            None => defaults.seed_catalog,
        };
        let max_upload_bytes = parse_var(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?;

        Ok(Self { port, upload_dir, upload_url_prefix, seed_catalog, max_upload_bytes })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { var, value: raw }),
        None => Ok(default),
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { var, value: raw.to_owned() }),
    }
}

// The router nests a file service here, which axum rejects at the root.
fn parse_prefix(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !trimmed.starts_with('/') || trimmed.is_empty() {
        return Err(ConfigError::UploadPrefix(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}
