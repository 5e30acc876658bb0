//! Runs `*-config` style tools and merges the flags they report.
use std::process::Command;

use crate::env::parse_flags;
use crate::error::{ConfigError, Result};
use crate::manager::ConfigManager;
use crate::options::OptionValue;
use crate::utils::log::{log, LogLevel};

/// How discovery tools are named and queried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverySettings {
    /// Appended to the lowercased prefix to name the default tool
    pub tool_suffix: String,
    /// Arguments passed to every tool
    pub args: Vec<String>,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            tool_suffix: "-config".to_string(),
            args: vec!["--cflags".to_string(), "--libs".to_string()],
        }
    }
}

impl DiscoverySettings {
    /// Name of the tool `CONFIG = true` runs for `prefix`, e.g. `sdl-config`
    pub fn default_tool(&self, prefix: &str) -> String {
        format!("{}{}", prefix.to_lowercase(), self.tool_suffix)
    }
}

/// Works out the command line for `prefix`, or `None` when discovery is off
pub fn discovery_command(
    manager: &ConfigManager,
    prefix: &str,
    settings: &DiscoverySettings,
) -> Result<Option<Vec<String>>> {
    let bag = manager.lookup(prefix)?;
    let (text, mut command) = match bag.get("CONFIG") {
        None => return Ok(None),
        Some(value) if value.is_falsy() => return Ok(None),
        Some(OptionValue::Flag(_)) => {
            let tool = settings.default_tool(prefix);
            (tool.clone(), vec![tool])
        }
        Some(OptionValue::Text(text)) => {
            let words = shell_words::split(text).map_err(|e| ConfigError::Discovery {
                command: text.clone(),
                reason: e.to_string(),
            })?;
            (text.clone(), words)
        }
        Some(OptionValue::List(words)) => (shell_words::join(words), words.clone()),
    };
    if command.is_empty() {
        return Err(ConfigError::Discovery {
            command: text,
            reason: "empty command".to_string(),
        });
    }
    command.extend(settings.args.iter().cloned());
    Ok(Some(command))
}

/// Runs the discovery tool for `prefix` and merges its flags into the manager
///
/// Does nothing unless the prefix sets `CONFIG`. `CONFIG = true` runs the
/// default tool, a string names the command to run. Any failure is returned
/// as [`ConfigError::Discovery`] naming the full command, and nothing is merged.
pub fn discover(
    manager: &mut ConfigManager,
    prefix: &str,
    settings: &DiscoverySettings,
) -> Result<()> {
    let Some(command) = discovery_command(manager, prefix, settings)? else {
        log(
            LogLevel::Debug,
            &format!("No discovery tool configured for {}", prefix),
        );
        return Ok(());
    };
    let command_text = shell_words::join(&command);
    log(LogLevel::Info, &format!("Running: {}", command_text));

    let failed = |reason: String| ConfigError::Discovery {
        command: command_text.clone(),
        reason,
    };

    let Some((program, args)) = command.split_first() else {
        return Err(failed("empty command".to_string()));
    };
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| failed(e.to_string()))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(failed(format!(
            "exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }
    let stdout = String::from_utf8(output.stdout)
        .map_err(|_| failed("output is not valid UTF-8".to_string()))?;
    let flags = parse_flags(&stdout).map_err(|e| failed(e.to_string()))?;

    log(
        LogLevel::Debug,
        &format!("{} reported:\n{}", command_text, flags),
    );
    manager
        .merge(prefix, flags.iter().map(|(k, v)| (k, v.clone())))
        .map_err(|e| failed(e.to_string()))
}

/// Runs discovery for every dependency, stopping at the first failure
pub fn discover_all(manager: &mut ConfigManager, settings: &DiscoverySettings) -> Result<()> {
    let names: Vec<String> = manager.names().map(str::to_string).collect();
    for name in names {
        discover(manager, &name, settings)?;
    }
    Ok(())
}
