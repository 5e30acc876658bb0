use clap::{Parser, Subcommand};
use depflags::global_config::GlobalConfig;
use depflags::utils::{self, log, LogLevel};
use depflags::{discovery, BuildEnv, ConfigError, ConfigManager};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Option source to read, defaults to the `source` setting
    #[arg(short, long)]
    source: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the dependencies declared in the option source
    List,
    /// Show the options of one dependency
    Show {
        /// Dependency prefix, e.g. SDL
        dep: String,
        /// Run the discovery tool first
        #[arg(long)]
        discover: bool,
    },
    /// Print compiler and linker arguments for dependencies
    Flags {
        /// Dependency prefixes, all of them if empty
        deps: Vec<String>,
        /// Skip running discovery tools
        #[arg(long)]
        no_discover: bool,
        /// Only print compiler arguments
        #[arg(long, conflicts_with = "libs")]
        cflags: bool,
        /// Only print linker arguments
        #[arg(long)]
        libs: bool,
    },
    /// Print the files matching a glob pattern
    Files {
        pattern: String,
        /// File names or paths to leave out
        #[arg(short = 'x', long)]
        exclude: Vec<String>,
    },
    /// Write the default option source to deps.toml
    Init,
    /// Set a global setting: tool_suffix, discovery_args or source
    Config { parameter: String, value: String },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log(LogLevel::Error, &e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ConfigError> {
    let settings_path = GlobalConfig::default_path();
    let global = match &settings_path {
        Some(path) => GlobalConfig::from_file(path)?,
        None => GlobalConfig::default(),
    };
    let source = cli
        .source
        .unwrap_or_else(|| PathBuf::from(global.get_source()));

    match cli.command {
        Commands::List => {
            let manager = ConfigManager::from_file(&source)?;
            for name in manager.names() {
                println!("{}", name);
            }
        }
        Commands::Show { dep, discover } => {
            let mut manager = ConfigManager::from_file(&source)?;
            if discover {
                discovery::discover(&mut manager, &dep, &global.discovery())?;
            }
            print!("{}", manager.lookup(&dep)?);
        }
        Commands::Flags {
            deps,
            no_discover,
            cflags,
            libs,
        } => {
            let mut manager = ConfigManager::from_file(&source)?;
            let deps: Vec<String> = if deps.is_empty() {
                manager.names().map(str::to_string).collect()
            } else {
                deps
            };
            // every tool runs before anything is applied
            if !no_discover {
                for dep in &deps {
                    discovery::discover(&mut manager, dep, &global.discovery())?;
                }
            }
            let mut env = BuildEnv::new();
            for dep in &deps {
                manager.apply(dep, &mut env)?;
            }
            let both = !cflags && !libs;
            if cflags || both {
                println!("{}", env.compile_line());
            }
            if libs || both {
                println!("{}", env.link_line());
            }
        }
        Commands::Files { pattern, exclude } => {
            let exclude: Vec<&str> = exclude.iter().map(String::as_str).collect();
            for file in utils::file_list(&pattern, &exclude)? {
                println!("{}", file.display());
            }
        }
        Commands::Init => init(Path::new("deps.toml"))?,
        Commands::Config { parameter, value } => {
            let path = settings_path.ok_or_else(|| {
                ConfigError::Settings("no config directory on this platform".to_string())
            })?;
            GlobalConfig::set_defaults(&path, &parameter, &value)?;
        }
    }
    Ok(())
}

fn init(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        log(
            LogLevel::Warn,
            &format!("{} already exists, leaving it alone", path.display()),
        );
        return Ok(());
    }
    std::fs::write(path, utils::DEFAULT_SOURCE).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log(LogLevel::Log, &format!("Created {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deps.toml");

        init(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, utils::DEFAULT_SOURCE);
        assert!(ConfigManager::from_file(&path).unwrap().contains("SDL"));

        std::fs::write(&path, "GL_LIBS = \"GL\"\n").unwrap();
        init(&path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "GL_LIBS = \"GL\"\n"
        );
    }

    #[test]
    fn flags_subcommand_parses() {
        let cli = Cli::parse_from(["depflags", "-s", "native.toml", "flags", "--libs", "SDL", "GL"]);
        assert_eq!(cli.source, Some(PathBuf::from("native.toml")));
        match cli.command {
            Commands::Flags {
                deps,
                no_discover,
                cflags,
                libs,
            } => {
                assert_eq!(deps, vec!["SDL", "GL"]);
                assert!(!no_discover);
                assert!(!cflags);
                assert!(libs);
            }
            _ => panic!("expected the flags subcommand"),
        }
        assert!(Cli::try_parse_from(["depflags", "flags", "--cflags", "--libs"]).is_err());
    }

    #[test]
    fn files_subcommand_collects_excludes() {
        let cli = Cli::parse_from(["depflags", "files", "src/*.cpp", "-x", "test.cpp", "-x", "old.cpp"]);
        match cli.command {
            Commands::Files { pattern, exclude } => {
                assert_eq!(pattern, "src/*.cpp");
                assert_eq!(exclude, vec!["test.cpp", "old.cpp"]);
            }
            _ => panic!("expected the files subcommand"),
        }
    }
}
