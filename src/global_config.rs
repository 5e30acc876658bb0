use crate::discovery::DiscoverySettings;
use crate::error::{ConfigError, Result};
use crate::utils::log::{log, LogLevel};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

enum ConfigParam {
    ToolSuffix(String),
    DiscoveryArgs(Vec<String>),
    Source(String),
}

/// Per user settings, stored as toml in the platform config directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    tool_suffix: String,
    discovery_args: Vec<String>,
    source: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        let discovery = DiscoverySettings::default();
        Self {
            tool_suffix: discovery.tool_suffix,
            discovery_args: discovery.args,
            source: "deps.toml".to_string(),
        }
    }
}

impl GlobalConfig {
    /// Location of the settings file, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "depflags")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Reads the settings at `path`, falling back to defaults when it does not exist
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            log(
                LogLevel::Debug,
                &format!("No settings at {}, using defaults", path.display()),
            );
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let contents =
            toml::to_string(self).map_err(|e| ConfigError::Settings(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Updates one setting by name and writes the file back
    /// # Arguments
    /// * `path` - The settings file
    /// * `parameter` - One of `tool_suffix`, `discovery_args` or `source`
    /// * `value` - The new value, `discovery_args` is split like a shell would
    pub fn set_defaults(path: &Path, parameter: &str, value: &str) -> Result<()> {
        let param = match parameter {
            "tool_suffix" => ConfigParam::ToolSuffix(value.to_string()),
            "discovery_args" => {
                let args = shell_words::split(value)
                    .map_err(|e| ConfigError::Settings(format!("discovery_args: {}", e)))?;
                ConfigParam::DiscoveryArgs(args)
            }
            "source" => {
                if value.trim().is_empty() {
                    return Err(ConfigError::Settings("source cannot be empty".to_string()));
                }
                ConfigParam::Source(value.to_string())
            }
            _ => {
                return Err(ConfigError::Settings(format!(
                    "unknown parameter `{}`. See `depflags config --help` for more info",
                    parameter
                )))
            }
        };

        let mut global_conf = Self::from_file(path)?;
        match param {
            ConfigParam::ToolSuffix(value) => global_conf.tool_suffix = value,
            ConfigParam::DiscoveryArgs(value) => global_conf.discovery_args = value,
            ConfigParam::Source(value) => global_conf.source = value,
        }
        global_conf.save(path)?;
        log(LogLevel::Log, &format!("Set {} in {}", parameter, path.display()));
        Ok(())
    }

    pub fn discovery(&self) -> DiscoverySettings {
        DiscoverySettings {
            tool_suffix: self.tool_suffix.clone(),
            args: self.discovery_args.clone(),
        }
    }

    pub fn get_source(&self) -> &str {
        &self.source
    }
}
