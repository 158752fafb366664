// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::model::RegenConfig;
use crate::config::validate::validate_config;

/// Load a configuration file from a given path and return the raw
/// `RegenConfig`.
///
/// This only performs TOML deserialization; it does **not** perform
/// semantic validation (distinct variant output directories, etc.).
/// Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RegenConfig> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading config file at {:?}", path))?;

    let config: RegenConfig = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML config from {:?}", path))?;

    Ok(config)
}

/// Load a configuration file from path and run basic validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks for:
///   - an empty generator program or option namespace,
///   - malformed discovery rules,
///   - multi-variant entries without distinct output identities.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<RegenConfig> {
    let config = load_from_path(&path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Helper to resolve a default config path.
///
/// Currently this just returns `Specregen.toml` in the current working
/// directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Specregen.toml")
}
