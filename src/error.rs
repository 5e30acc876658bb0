use std::path::PathBuf;

/// Errors raised while loading, merging or discovering dependency options
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read option source {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not parse option source {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Option `{0}` must be named PREFIX_KEY")]
    MissingPrefix(String),

    #[error("Option `{key}` has an unsupported {kind} value")]
    UnsupportedValue { key: String, kind: &'static str },

    #[error("No options found for dependency `{0}`")]
    NotFound(String),

    #[error("Failed to run `{command}`: {reason}")]
    Discovery { command: String, reason: String },

    #[error("Could not parse flags: {0}")]
    Flags(String),

    #[error("Invalid file pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Invalid setting: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
