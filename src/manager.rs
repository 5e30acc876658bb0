//! Groups declared options by dependency and hands them to a build environment.
use indexmap::IndexMap;

use crate::error::{ConfigError, Result};
use crate::options::{OptionBag, OptionValue};
use crate::utils::configs::OptionSource;
use crate::utils::log::{log, LogLevel};

/// Something that can take a dependency's options, usually the compile/link
/// state of the surrounding build tool
pub trait Environment {
    fn append_options(&mut self, options: &OptionBag);
}

/// Keys that are kept verbatim instead of being split on whitespace
pub fn is_flags_key(key: &str) -> bool {
    key.contains("FLAGS")
}

fn check_text(prefix: &str, key: &str, value: &OptionValue) -> Result<()> {
    if let OptionValue::Text(text) = value {
        shell_words::split(text)
            .map_err(|e| ConfigError::Flags(format!("{}_{}: {}", prefix, key, e)))?;
    }
    Ok(())
}

/// Options for every dependency, keyed by prefix
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    deps: IndexMap<String, OptionBag>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the manager from an option source
    ///
    /// Empty values are skipped and never create a bag. String values are
    /// split on whitespace unless their key is a flags key. Flags strings must
    /// split cleanly with shell rules.
    pub fn load(source: &OptionSource) -> Result<Self> {
        let mut manager = Self::new();
        for decl in source.declarations() {
            if decl.value.is_falsy() {
                continue;
            }
            let value = match &decl.value {
                OptionValue::Text(text) if !is_flags_key(&decl.key) => {
                    OptionValue::list(text.split_whitespace())
                }
                other => {
                    check_text(&decl.prefix, &decl.key, other)?;
                    other.clone()
                }
            };
            manager
                .deps
                .entry(decl.prefix.clone())
                .or_default()
                .merge_into(&decl.key, value);
        }
        log(
            LogLevel::Debug,
            &format!("Loaded options for {} dependencies", manager.deps.len()),
        );
        Ok(manager)
    }

    /// Reads the option source at `path` and builds the manager from it
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::load(&OptionSource::from_file(path)?)
    }

    /// Returns the options of `name`
    pub fn lookup(&self, name: &str) -> Result<&OptionBag> {
        self.deps
            .get(name)
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))
    }

    /// Accumulates `options` into the bag of `name`, creating it if needed
    ///
    /// Nothing is merged if any string value does not split with shell rules.
    pub fn merge<K, I>(&mut self, name: &str, options: I) -> Result<()>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, OptionValue)>,
    {
        let options: Vec<(K, OptionValue)> = options.into_iter().collect();
        for (key, value) in &options {
            check_text(name, key.as_ref(), value)?;
        }
        let bag = self.deps.entry(name.to_string()).or_default();
        for (key, value) in options {
            bag.merge_into(key.as_ref(), value);
        }
        Ok(())
    }

    /// Appends the options of `name` onto `env` in one call
    pub fn apply<E: Environment + ?Sized>(&self, name: &str, env: &mut E) -> Result<()> {
        let bag = self.lookup(name)?;
        log(LogLevel::Debug, &format!("Applying options for {}", name));
        env.append_options(bag);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.deps.contains_key(name)
    }

    /// Dependency names in the order they were declared
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.deps.keys().map(String::as_str)
    }
}
