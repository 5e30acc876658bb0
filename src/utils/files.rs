use std::path::PathBuf;

use super::log::{log, LogLevel};
use crate::error::{ConfigError, Result};

/// Returns the files matching `pattern`, minus anything named in `exclude`
/// # Arguments
/// * `pattern` - A glob pattern such as `src/*.cpp`
/// * `exclude` - Paths or bare file names to leave out
///
/// Files come back in the order the matcher yields them.
/// No match is not an error, the result is simply empty.
pub fn file_list(pattern: &str, exclude: &[&str]) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|source| ConfigError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                log(LogLevel::Warn, &format!("Skipping unreadable entry: {}", e));
                continue;
            }
        };
        if is_excluded(&path, exclude) {
            log(
                LogLevel::Debug,
                &format!("Excluding: {}", path.display()),
            );
            continue;
        }
        files.push(path);
    }
    Ok(files)
}

fn is_excluded(path: &std::path::Path, exclude: &[&str]) -> bool {
    let full = path.to_string_lossy();
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    exclude.iter().any(|ex| *ex == full || *ex == name)
}
