use std::{fs::File, io::Read, path::Path};
use toml::{Table, Value};

use super::log::{log, LogLevel};
use crate::error::{ConfigError, Result};
use crate::options::OptionValue;

/// The option source shipped with depflags
pub const DEFAULT_SOURCE: &str = include_str!("../../deps.toml");

/// A single `PREFIX_KEY = value` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub prefix: String,
    pub key: String,
    pub value: OptionValue,
}

/// Declarations read from a toml option source, in document order
///
/// Options may be written flat or grouped under a table named after the prefix:
/// ```toml
/// SDL_CONFIG = true
/// SDL_LIBS = "SDL SDL_image"
///
/// [GL]
/// LIBS = ["GL", "GLU"]
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionSource {
    declarations: Vec<Declaration>,
}

impl OptionSource {
    /// Reads and parses the option source at `path`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let table = contents
            .parse::<Table>()
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let source = Self::from_table(&table)?;
        log(
            LogLevel::Debug,
            &format!(
                "Read {} declarations from {}",
                source.declarations.len(),
                path.display()
            ),
        );
        Ok(source)
    }

    /// Parses an option source held in memory
    pub fn parse(contents: &str) -> Result<Self> {
        let table = contents
            .parse::<Table>()
            .map_err(|source| ConfigError::Parse {
                path: "<memory>".into(),
                source,
            })?;
        Self::from_table(&table)
    }

    /// The option source shipped with depflags
    pub fn defaults() -> Result<Self> {
        Self::parse(DEFAULT_SOURCE)
    }

    fn from_table(table: &Table) -> Result<Self> {
        let mut declarations = Vec::new();
        for (name, value) in table {
            if let Value::Table(group) = value {
                if name.is_empty() {
                    return Err(ConfigError::MissingPrefix(name.clone()));
                }
                for (key, value) in group {
                    let full_name = format!("{}_{}", name, key);
                    declarations.push(Declaration {
                        prefix: name.clone(),
                        key: key.clone(),
                        value: to_option_value(&full_name, value)?,
                    });
                }
            } else {
                let (prefix, key) = split_name(name)?;
                declarations.push(Declaration {
                    prefix: prefix.to_string(),
                    key: key.to_string(),
                    value: to_option_value(name, value)?,
                });
            }
        }
        Ok(Self { declarations })
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn push(&mut self, name: &str, value: OptionValue) -> Result<()> {
        let (prefix, key) = split_name(name)?;
        self.declarations.push(Declaration {
            prefix: prefix.to_string(),
            key: key.to_string(),
            value,
        });
        Ok(())
    }
}

/// Splits `SDL_CXXFLAGS` into `("SDL", "CXXFLAGS")` at the first underscore
pub fn split_name(name: &str) -> Result<(&str, &str)> {
    match name.split_once('_') {
        Some((prefix, key)) if !prefix.is_empty() && !key.is_empty() => Ok((prefix, key)),
        _ => Err(ConfigError::MissingPrefix(name.to_string())),
    }
}

fn to_option_value(name: &str, value: &Value) -> Result<OptionValue> {
    match value {
        Value::String(text) => Ok(OptionValue::Text(text.clone())),
        Value::Boolean(flag) => Ok(OptionValue::Flag(*flag)),
        Value::Array(items) => {
            let mut list = Vec::with_capacity(items.len());
            for item in items {
                let item = item.as_str().ok_or_else(|| ConfigError::UnsupportedValue {
                    key: name.to_string(),
                    kind: item.type_str(),
                })?;
                list.push(item.to_string());
            }
            Ok(OptionValue::List(list))
        }
        other => Err(ConfigError::UnsupportedValue {
            key: name.to_string(),
            kind: other.type_str(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flat_and_grouped_forms() {
        let source = OptionSource::parse(
            r#"
SDL_LIBS = "SDL SDL_image"
SDL_CONFIG = true

[GL]
LIBS = ["GL", "GLU"]
"#,
        )
        .unwrap();

        let decls = source.declarations();
        assert_eq!(decls.len(), 3);
        assert_eq!(decls[0].prefix, "SDL");
        assert_eq!(decls[0].key, "LIBS");
        assert_eq!(decls[0].value, OptionValue::text("SDL SDL_image"));
        assert_eq!(decls[1].value, OptionValue::Flag(true));
        assert_eq!(decls[2].prefix, "GL");
        assert_eq!(decls[2].value, OptionValue::list(["GL", "GLU"]));
    }

    #[test]
    fn split_at_first_underscore() {
        assert_eq!(split_name("SDL_LINK_FLAGS").unwrap(), ("SDL", "LINK_FLAGS"));
        assert!(matches!(
            split_name("SDLLIBS"),
            Err(ConfigError::MissingPrefix(name)) if name == "SDLLIBS"
        ));
        assert!(split_name("_LIBS").is_err());
        assert!(split_name("SDL_").is_err());
    }

    #[test]
    fn key_without_underscore_fails() {
        let err = OptionSource::parse("LIBS = \"m\"").unwrap_err();
        assert!(matches!(err, ConfigError::MissingPrefix(name) if name == "LIBS"));
    }

    #[test]
    fn unsupported_values_are_rejected() {
        let err = OptionSource::parse("SDL_VERSION = 2").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnsupportedValue { key, kind: "integer" } if key == "SDL_VERSION"
        ));

        let err = OptionSource::parse("GL_LIBS = [\"GL\", 3]").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedValue { .. }));

        let err = OptionSource::parse("[GL]\nLIBS = { name = \"GL\" }").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedValue { kind: "table", .. }));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deps.toml");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "Boost_CPPPATH = \"/opt/boost/include\"").unwrap();

        let source = OptionSource::from_file(&path).unwrap();
        assert_eq!(source.declarations()[0].prefix, "Boost");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = OptionSource::from_file(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn shipped_defaults_parse() {
        let source = OptionSource::defaults().unwrap();
        let prefixes: Vec<&str> = source
            .declarations()
            .iter()
            .map(|d| d.prefix.as_str())
            .collect();
        for prefix in ["SDL", "Assimp", "GL", "GLEW", "Boost"] {
            assert!(prefixes.contains(&prefix), "missing {}", prefix);
        }
    }
}
