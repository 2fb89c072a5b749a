//! Configuration management for erbfmt.
//!
//! This module provides the [`Config`] struct which controls all formatting behavior.
//! Configuration can be loaded from:
//! - TOML files (`erbfmt.toml`)
//! - CLI arguments (which override file settings)
//! - In-file directives (`<%# erbfmt: --line-width 100 %>`)
//!
//! Config files are auto-discovered by searching parent directories from the file
//! being formatted up to the filesystem root, plus the user's home directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::embed::{CommandFormatter, ListedClassOrder};

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["erbfmt.toml"];

fn dirs_home() -> Option<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

fn default_line_width() -> usize {
    80
}

/// Main configuration struct for erbfmt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum line width (default: 80)
    #[serde(default = "default_line_width")]
    pub line_width: usize,

    /// Put every class of an overlong `class` attribute on its own line
    #[serde(default)]
    pub single_class_per_line: bool,

    /// Preferred order of class names; entries ending in `*` match by prefix.
    /// Empty means classes keep their source order.
    #[serde(default)]
    pub class_order: Vec<String>,

    /// External command used to format embedded Ruby, e.g. `rufo --width {width}`
    #[serde(default)]
    pub code_formatter: Option<String>,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    pub line_width: Option<usize>,
    pub single_class_per_line: Option<bool>,
    pub class_order: Option<Vec<String>>,
    pub code_formatter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            line_width: default_line_width(),
            single_class_per_line: false,
            class_order: Vec::new(),
            code_formatter: None,
        }
    }
}

impl Config {
    const MAX_LINE_WIDTH: usize = 1000;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.line_width == 0 {
            return Some("line_width must be at least 1".to_string());
        }
        if self.line_width > Self::MAX_LINE_WIDTH {
            return Some(format!(
                "line_width {} exceeds maximum of {}",
                self.line_width,
                Self::MAX_LINE_WIDTH
            ));
        }
        if let Some(command) = &self.code_formatter {
            if command.trim().is_empty() {
                return Some("code_formatter must not be empty".to_string());
            }
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.line_width {
            self.line_width = v;
        }
        if let Some(v) = partial.single_class_per_line {
            self.single_class_per_line = v;
        }
        if let Some(v) = &partial.class_order {
            self.class_order.clone_from(v);
        }
        if let Some(v) = &partial.code_formatter {
            self.code_formatter = Some(v.clone());
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home directory config.
    /// Returns list of config file paths in order of priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            // Not on disk (e.g. a --stdin-filename); use its parent if that exists
            start_path
                .parent()
                .filter(|p| p.is_dir())
                .map(Path::to_path_buf)
                .or_else(|| std::env::current_dir().ok())
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Unreadable or invalid files are skipped with a warning.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let mut config = Self::default();
        for path in &Self::discover_config_files(start_path) {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => {
                        tracing::debug!(path = %path.display(), "loaded config");
                        config.apply_partial(&partial);
                    }
                    Err(e) => tracing::warn!("failed to parse {}: {e}", path.display()),
                },
                Err(e) => tracing::warn!("failed to read {}: {e}", path.display()),
            }
        }
        config
    }

    /// Class ranking built from `class_order`, if one is configured
    #[must_use]
    pub fn class_order(&self) -> Option<ListedClassOrder> {
        let order = ListedClassOrder::new(&self.class_order);
        (!order.is_empty()).then_some(order)
    }

    /// External code formatter built from `code_formatter`, if one is configured
    #[must_use]
    pub fn code_formatter(&self) -> Option<CommandFormatter> {
        self.code_formatter.as_deref().and_then(CommandFormatter::parse)
    }
}
