//! Configuration module
//!
//! Handles loading, parsing, and validating TOML configuration files.
//! Every setting has a default, so a config file is optional.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, FetchConfig, OutputConfig, PlatformConfig, SessionConfig};
pub use validation::validate;
