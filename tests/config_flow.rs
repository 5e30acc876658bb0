use depflags::discovery::{self, DiscoverySettings};
use depflags::utils::configs::OptionSource;
use depflags::{BuildEnv, ConfigError, ConfigManager, Environment, OptionBag, OptionValue};

#[derive(Default)]
struct CountingEnv {
    appended: Vec<OptionBag>,
}

impl Environment for CountingEnv {
    fn append_options(&mut self, options: &OptionBag) {
        self.appended.push(options.clone());
    }
}

#[test]
fn sdl_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deps.toml");
    std::fs::write(
        &path,
        "SDL_LIBS = 'SDL SDL_image'\nSDL_CXXFLAGS = '-DUSE_SDL'\nBoost_CPPPATH = ''\n",
    )
    .unwrap();

    let manager = ConfigManager::from_file(&path).unwrap();
    let bag = manager.lookup("SDL").unwrap();
    assert_eq!(bag.len(), 2);
    assert_eq!(bag.get("LIBS"), Some(&OptionValue::list(["SDL", "SDL_image"])));
    assert_eq!(bag.get("CXXFLAGS"), Some(&OptionValue::text("-DUSE_SDL")));
    assert!(matches!(manager.lookup("Boost"), Err(ConfigError::NotFound(_))));

    let mut env = CountingEnv::default();
    manager.apply("SDL", &mut env).unwrap();
    assert_eq!(env.appended.len(), 1);
    assert_eq!(&env.appended[0], bag);
}

#[test]
fn shipped_defaults_render_without_discovery() {
    let manager = ConfigManager::load(&OptionSource::defaults().unwrap()).unwrap();
    let names: Vec<&str> = manager.names().collect();
    assert_eq!(names, vec!["SDL", "Assimp", "GL", "GLEW"]);

    let mut env = BuildEnv::new();
    for name in ["GL", "GLEW"] {
        manager.apply(name, &mut env).unwrap();
    }
    assert_eq!(env.compile_args(), vec!["-DGLEW_NO_GLU"]);
    assert_eq!(env.link_args(), vec!["-lGL", "-lGLU", "-lGLEW"]);
}

#[test]
fn failed_discovery_stops_before_apply() {
    let mut manager = ConfigManager::load(
        &OptionSource::parse("Zzdep_CONFIG = true\nZzdep_LIBS = \"zz\"").unwrap(),
    )
    .unwrap();

    let result = discovery::discover(&mut manager, "Zzdep", &DiscoverySettings::default());
    let err = result.unwrap_err();
    assert!(err.to_string().contains("zzdep-config --cflags --libs"));
    assert_eq!(
        manager.lookup("Zzdep").unwrap().get("LIBS"),
        Some(&OptionValue::list(["zz"]))
    );
}

#[test]
fn discovered_flags_accumulate_after_declared_ones() {
    let mut manager = ConfigManager::new();
    manager
        .merge("SDL", [("LIBS", OptionValue::list(["SDL_image"]))])
        .unwrap();
    let discovered = depflags::env::parse_flags("-I/usr/include/SDL -lSDL").unwrap();
    manager
        .merge("SDL", discovered.iter().map(|(k, v)| (k, v.clone())))
        .unwrap();

    let mut env = BuildEnv::new();
    manager.apply("SDL", &mut env).unwrap();
    assert_eq!(env.compile_line(), "-I/usr/include/SDL");
    assert_eq!(env.link_line(), "-lSDL_image -lSDL");
}

#[test]
fn declared_link_flags_stay_separate_words_after_discovery() {
    let mut manager = ConfigManager::load(
        &OptionSource::parse("SDL_LINKFLAGS = \"-Wl,--as-needed -rdynamic\"").unwrap(),
    )
    .unwrap();
    let discovered = depflags::env::parse_flags("-pthread -lSDL").unwrap();
    manager
        .merge("SDL", discovered.iter().map(|(k, v)| (k, v.clone())))
        .unwrap();

    let mut env = BuildEnv::new();
    manager.apply("SDL", &mut env).unwrap();
    assert_eq!(
        env.link_args(),
        vec!["-Wl,--as-needed", "-rdynamic", "-pthread", "-lSDL"]
    );
    assert_eq!(env.compile_args(), vec!["-pthread"]);
}
