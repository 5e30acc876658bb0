use colored::Colorize;

//Log utils
#[derive(PartialEq, PartialOrd, Debug, Clone, Copy)]
/// This enum is used to represent the different log levels
pub enum LogLevel {
    Debug,
    Info,
    Log,
    Warn,
    Error,
}

impl LogLevel {
    /// Reads the level from `DEPFLAGS_LOG_LEVEL`, defaulting to `Log`
    pub fn from_env() -> Self {
        match std::env::var("DEPFLAGS_LOG_LEVEL") {
            Ok(val) => match val.as_str() {
                "Debug" => LogLevel::Debug,
                "Info" => LogLevel::Info,
                "Log" => LogLevel::Log,
                "Warn" => LogLevel::Warn,
                "Error" => LogLevel::Error,
                _ => LogLevel::Log,
            },
            Err(_) => LogLevel::Log,
        }
    }
}

/// This function is used to log messages to the console
/// # Arguments
/// * `level` - The log level of the message
/// * `message` - The message to log
/// # Example
/// ```
/// use depflags::utils::{log, LogLevel};
/// log(LogLevel::Info, "Loaded deps.toml");
/// ```
///
/// # Level setting
/// The log level can be set by setting the environment variable `DEPFLAGS_LOG_LEVEL`
/// to one of the following values:
/// * `Debug`
/// * `Info`
/// * `Log`
/// * `Warn`
/// * `Error`
/// If the environment variable is not set, the default log level is `Log`.
/// Errors go to stderr so printed flags stay usable in shell substitutions.
pub fn log(level: LogLevel, message: &str) {
    let level_str = match level {
        LogLevel::Debug => "[DEBUG]".purple(),
        LogLevel::Info => "[INFO]".blue(),
        LogLevel::Log => "[LOG]".green(),
        LogLevel::Warn => "[WARN]".yellow(),
        LogLevel::Error => "[ERROR]".red(),
    };
    if level < LogLevel::from_env() {
        return;
    }
    if level >= LogLevel::Warn {
        eprintln!("{} {}", level_str, message);
    } else {
        println!("{} {}", level_str, message);
    }
}
