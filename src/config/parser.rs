//! Config file loading and integrity hashing

use crate::config::{validate, Config};
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Loads and validates a TOML configuration file
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let (config, _hash) = load_config_with_hash(path)?;
    Ok(config)
}

/// Loads a config file and returns it with a hash of its content
///
/// The hash identifies exactly which configuration produced a given record
/// batch, independent of file paths or formatting-preserving edits.
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let content = fs::read_to_string(path)?;
    let hash = compute_config_hash(&content);

    let config: Config = toml::from_str(&content)?;
    validate(&config)?;

    Ok((config, hash))
}

/// SHA-256 hex digest of the raw config content
pub fn compute_config_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
