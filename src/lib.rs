//! A library for declaring the compiler and linker options of a native
//! project's third party dependencies.
//!
//! Options live in a toml file, `deps.toml` by default. Every option is named
//! `PREFIX_KEY`, where the prefix names the dependency. Options of one prefix
//! are gathered into an option bag which can be applied onto a build environment.
//!
//! # Installation
//! ```sh
//! cargo install depflags
//! ```
//!
//! # Examples
//! To get the various flags that can be passed to depflags
//! ```sh
//! depflags -h
//! ```
//!
//! # Sample toml file
//! ```toml
//! # deps.toml
//! SDL_CONFIG = true
//! SDL_LIBS = "SDL_image SDL_mixer"
//! SDL_CXXFLAGS = "-DUSE_SDL"
//! Boost_CPPPATH = ""
//!
//! [GL]
//! LIBS = ["GL", "GLU"]
//! ```
//! `SDL_CONFIG = true` asks `sdl-config --cflags --libs` for the rest of the SDL flags.
//!
//! # Library use
//! ```no_run
//! use depflags::{discovery, BuildEnv, ConfigManager};
//!
//! let mut manager = ConfigManager::from_file("deps.toml")?;
//! discovery::discover(&mut manager, "SDL", &Default::default())?;
//!
//! let mut env = BuildEnv::new();
//! manager.apply("SDL", &mut env)?;
//! println!("{}", env.compile_line());
//! # Ok::<(), depflags::ConfigError>(())
//! ```

/// Runs flag discovery tools
pub mod discovery;
/// Build environment that renders applied options
pub mod env;
/// Error type shared by the crate
pub mod error;
/// Handles global config
pub mod global_config;
/// Groups options by dependency
pub mod manager;
/// Option values and bags
pub mod options;
/// Contains logger, option source parser and file lists
pub mod utils;

pub use env::BuildEnv;
pub use error::{ConfigError, Result};
pub use manager::{ConfigManager, Environment};
pub use options::{OptionBag, OptionValue};
