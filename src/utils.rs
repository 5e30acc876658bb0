/// Contains the option source parser
pub mod configs;
/// Contains the file list helper
pub mod files;
/// Contains the logger
pub mod log;

pub use configs::{Declaration, OptionSource, DEFAULT_SOURCE};
pub use files::file_list;
pub use self::log::{log, LogLevel};
