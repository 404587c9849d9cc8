use std::fs;
use std::path::Path;

use crate::error::ConfigError;

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

/// directive emitted as the first line of every listing
pub const DEFAULT_HEADER: &str = "bits 16";

/// generated labels are named `label1`, `label2`, ...
pub const DEFAULT_LABEL_PREFIX: &str = "label";

/// listing settings, usually read from a toml file:
///
/// ```toml
/// header = "bits 16"
/// label_prefix = "l_"
/// annotate = true
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub header: String,
    pub label_prefix: String,

    /// render offsets and raw bytes next to each instruction
    pub annotate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            header: DEFAULT_HEADER.to_owned(),
            label_prefix: DEFAULT_LABEL_PREFIX.to_owned(),
            annotate: false,
        }
    }
}

impl Config {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path)?;
        Config::from_toml(&s)
    }
}
