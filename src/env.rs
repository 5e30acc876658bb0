//! A build environment that collects applied options and renders them as
//! compiler and linker arguments.
use itertools::Itertools;

use crate::error::{ConfigError, Result};
use crate::manager::Environment;
use crate::options::{split_text, OptionBag, OptionValue};

const COMPILE_FLAG_KEYS: [&str; 3] = ["CCFLAGS", "CFLAGS", "CXXFLAGS"];
const LIB_SUFFIXES: [&str; 4] = [".a", ".so", ".lib", ".dylib"];

/// Compile and link state built up from dependency options
#[derive(Debug, Clone, Default)]
pub struct BuildEnv {
    options: OptionBag,
}

impl Environment for BuildEnv {
    fn append_options(&mut self, options: &OptionBag) {
        self.options.extend(options);
    }
}

impl BuildEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Include paths, defines and compile flags
    pub fn compile_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for path in self.words("CPPPATH") {
            args.push(format!("-I{}", path));
        }
        for define in self.words("CPPDEFINES") {
            args.push(format!("-D{}", define));
        }
        for key in COMPILE_FLAG_KEYS {
            args.extend(self.words(key));
        }
        args
    }

    /// Link flags, library paths and libraries
    pub fn link_args(&self) -> Vec<String> {
        let mut args = self.words("LINKFLAGS");
        for path in self.words("LIBPATH") {
            args.push(format!("-L{}", path));
        }
        for lib in self.words("LIBS") {
            if looks_like_library_file(&lib) {
                args.push(lib);
            } else {
                args.push(format!("-l{}", lib));
            }
        }
        args
    }

    pub fn compile_line(&self) -> String {
        self.compile_args().iter().map(|a| shell_words::quote(a)).join(" ")
    }

    pub fn link_line(&self) -> String {
        self.link_args().iter().map(|a| shell_words::quote(a)).join(" ")
    }

    fn words(&self, key: &str) -> Vec<String> {
        match self.options.get(key) {
            Some(OptionValue::List(items)) => items.clone(),
            // flags strings were stored unsplit
            Some(OptionValue::Text(text)) => split_text(text),
            Some(OptionValue::Flag(_)) | None => Vec::new(),
        }
    }
}

fn looks_like_library_file(lib: &str) -> bool {
    lib.contains('/') || LIB_SUFFIXES.iter().any(|suffix| lib.ends_with(suffix))
}

/// Sorts the flags printed by a `*-config` tool into option keys
///
/// `-I`, `-L`, `-l` and `-D` go to `CPPPATH`, `LIBPATH`, `LIBS` and `CPPDEFINES`.
/// Linker only flags go to `LINKFLAGS`, `-pthread` to both `CCFLAGS` and
/// `LINKFLAGS`, library files to `LIBS` and everything else to `CCFLAGS`.
pub fn parse_flags(text: &str) -> Result<OptionBag> {
    let words = shell_words::split(text).map_err(|e| ConfigError::Flags(e.to_string()))?;
    let mut bag = OptionBag::new();
    let mut words = words.into_iter();

    while let Some(word) = words.next() {
        let word = word.as_str();
        match word {
            "-I" => bag.merge_into("CPPPATH", OptionValue::list([take_arg(&mut words, word)?])),
            "-L" => bag.merge_into("LIBPATH", OptionValue::list([take_arg(&mut words, word)?])),
            "-l" => bag.merge_into("LIBS", OptionValue::list([take_arg(&mut words, word)?])),
            "-D" => bag.merge_into("CPPDEFINES", OptionValue::list([take_arg(&mut words, word)?])),
            "-framework" => {
                let arg = take_arg(&mut words, word)?;
                bag.merge_into("LINKFLAGS", OptionValue::list([word.to_string(), arg]));
            }
            "-isystem" | "-include" | "-idirafter" => {
                let arg = take_arg(&mut words, word)?;
                bag.merge_into("CCFLAGS", OptionValue::list([word.to_string(), arg]));
            }
            "-pthread" => {
                bag.merge_into("CCFLAGS", OptionValue::list([word]));
                bag.merge_into("LINKFLAGS", OptionValue::list([word]));
            }
            "-rdynamic" => bag.merge_into("LINKFLAGS", OptionValue::list([word])),
            _ => {
                if let Some(path) = word.strip_prefix("-I") {
                    bag.merge_into("CPPPATH", OptionValue::list([path]));
                } else if let Some(path) = word.strip_prefix("-L") {
                    bag.merge_into("LIBPATH", OptionValue::list([path]));
                } else if let Some(lib) = word.strip_prefix("-l") {
                    bag.merge_into("LIBS", OptionValue::list([lib]));
                } else if let Some(define) = word.strip_prefix("-D") {
                    bag.merge_into("CPPDEFINES", OptionValue::list([define]));
                } else if word.starts_with("-Wl,") {
                    bag.merge_into("LINKFLAGS", OptionValue::list([word]));
                } else if !word.starts_with('-') && looks_like_library_file(word) {
                    bag.merge_into("LIBS", OptionValue::list([word]));
                } else {
                    bag.merge_into("CCFLAGS", OptionValue::list([word]));
                }
            }
        }
    }
    Ok(bag)
}

fn take_arg(words: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    words
        .next()
        .ok_or_else(|| ConfigError::Flags(format!("`{}` is missing its argument", flag)))
}
