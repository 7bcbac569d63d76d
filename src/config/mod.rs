//! Configuration system for nodepath.
//!
//! This module provides the configuration structure for nodepath with sensible
//! defaults and support for serialization/deserialization via serde.
//! Configuration is loaded from a TOML file and merged with command-line
//! arguments, which always win.
//!
//! # Example
//!
//! ```
//! use nodepath::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert!(config.optimize);
//! assert!(!config.drop_whitespace);
//!
//! // Create custom configuration
//! let custom = Config {
//!     optimize: false,
//!     show_category: true,
//!     ..Config::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for the nodepath command.
///
/// # Fields
///
/// * `optimize` - Prefer id-anchored locators (default: true)
/// * `drop_whitespace` - Skip whitespace-only text nodes when parsing (default: false)
/// * `show_category` - Prefix each output line with the node category (default: false)
/// * `include_attributes` - Also print locators for attribute nodes (default: false)
/// * `warn_on_partial` - Report truncated locators on stderr (default: true)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Prefer id-anchored locators
    #[serde(default = "default_optimize")]
    pub optimize: bool,

    /// Skip whitespace-only text nodes when parsing markup
    #[serde(default)]
    pub drop_whitespace: bool,

    /// Prefix each output line with the node category
    #[serde(default)]
    pub show_category: bool,

    /// Also print locators for attribute nodes
    #[serde(default)]
    pub include_attributes: bool,

    /// Report truncated locators on stderr
    #[serde(default = "default_warn_on_partial")]
    pub warn_on_partial: bool,
}

/// Returns the default locator style.
fn default_optimize() -> bool {
    true
}

/// Returns the default for reporting truncated locators.
fn default_warn_on_partial() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            optimize: default_optimize(),
            drop_whitespace: false,
            show_category: false,
            include_attributes: false,
            warn_on_partial: default_warn_on_partial(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/nodepath/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("nodepath");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("Ignoring invalid config {}: {}", path.display(), err);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`.
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimize_default() {
        let config = Config::default();
        assert!(config.optimize);
        assert!(config.warn_on_partial);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("show_category = true").unwrap();
        assert!(config.show_category);
        assert!(config.optimize);
        assert!(!config.include_attributes);
    }
}
