//! Configuration vault – reads/writes `~/.robots/config.toml`.
//!
//! The file extends the built-in factory catalog:
//!
//! ```toml
//! default_model = "scout"
//!
//! [processors.turbo]
//! max_events_count = 2
//! available_events = ["scan", "ping"]
//! max_actions_count = 4
//! available_actions = ["move", "shoot", "turn"]
//!
//! [[models]]
//! name = "racer"
//! engine = "turbo-jet"
//! memory = "mem-16"
//! sensors = ["radar"]
//! processor = "turbo"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use robots_hal::{Factory, ModelBlueprint};
use robots_types::ProcessorSpec;
use serde::{Deserialize, Serialize};

/// Persisted user configuration.  Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Model used when a command does not name one.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Extra processor presets, keyed by preset name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub processors: BTreeMap<String, ProcessorSpec>,

    /// Extra robot models.  A model named like a built-in replaces it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<ModelBlueprint>,
}

fn default_model() -> String {
    "scout".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            processors: BTreeMap::new(),
            models: Vec::new(),
        }
    }
}

impl Config {
    /// Built-in factory extended with the presets and models declared here.
    pub fn factory(&self) -> Factory {
        let mut factory = Factory::new();
        for (name, spec) in &self.processors {
            let mut spec = spec.clone();
            spec.name = name.clone();
            factory.register_processor(spec);
        }
        for model in &self.models {
            factory.register_model(model.clone());
        }
        factory
    }
}

/// Return the config path: `$ROBOTS_CONFIG` when set, else
/// `~/.robots/config.toml`.
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("ROBOTS_CONFIG") {
        return PathBuf::from(path);
    }
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

/// Build the config path relative to the given home directory.
pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".robots").join("config.toml")
}

/// Load the config from disk.  Returns `None` if the file does not exist.
pub fn load() -> Result<Option<Config>, String> {
    load_from(&config_path())
}

pub(crate) fn load_from(path: &Path) -> Result<Option<Config>, String> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(format!("Failed to read config at {}: {}", path.display(), e)),
    };
    let mut cfg: Config = toml::from_str(&raw)
        .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))?;
    apply_env_overrides(&mut cfg);
    Ok(Some(cfg))
}

/// Load the config, falling back to defaults (with env overrides) when the
/// file is absent.
pub fn load_or_default() -> Result<Config, String> {
    match load()? {
        Some(cfg) => Ok(cfg),
        None => {
            let mut cfg = Config::default();
            apply_env_overrides(&mut cfg);
            Ok(cfg)
        }
    }
}

/// Apply `ROBOTS_*` environment variable overrides to `cfg`.
///
/// | Variable | Config field |
/// |---|---|
/// | `ROBOTS_DEFAULT_MODEL` | `default_model` |
pub fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(v) = std::env::var("ROBOTS_DEFAULT_MODEL")
        && !v.trim().is_empty()
    {
        cfg.default_model = v;
    }
}

/// Save the config, creating the parent directory if necessary.  Both are
/// owner-only on Unix.
pub fn save_to(cfg: &Config, path: &Path) -> Result<(), String> {
    let raw = toml::to_string_pretty(cfg)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .and_then(|()| restrict(parent, 0o700))
            .map_err(|e| format!("Failed to prepare config directory: {}", e))?;
    }
    write_private(path, raw.as_bytes())
        .map_err(|e| format!("Failed to write config at {}: {}", path.display(), e))
}

#[cfg(unix)]
fn restrict(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn restrict(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)?.write_all(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use robots_types::{InstructionBatch, RobotError};

    const EXTENDED: &str = r#"
        default_model = "racer"

        [processors.turbo]
        max_events_count = 2
        available_events = ["scan", "ping"]
        max_actions_count = 4
        available_actions = ["move", "shoot", "turn"]

        [[models]]
        name = "racer"
        engine = "turbo-jet"
        memory = "mem-16"
        sensors = ["radar"]
        processor = "turbo"
    "#;

    #[test]
    fn config_path_points_to_robots_dir() {
        let p = config_path_for_home("/home/testuser");
        assert!(p.to_string_lossy().contains(".robots"));
        assert!(p.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn load_from_returns_none_when_missing() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());
        assert!(load_from(&path).expect("no error").is_none());
    }

    #[test]
    fn roundtrip_default_config() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());

        save_to(&Config::default(), &path).expect("save");
        let loaded = load_from(&path).expect("load ok").expect("some");
        assert!(loaded.models.is_empty());
        assert!(loaded.processors.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn config_file_has_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());

        save_to(&Config::default(), &path).expect("save");

        let file_mode = std::fs::metadata(&path).expect("meta").permissions().mode() & 0o777;
        assert_eq!(file_mode, 0o600);
        let dir_mode = std::fs::metadata(path.parent().unwrap())
            .expect("meta")
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(dir_mode, 0o700);
    }

    #[test]
    fn extended_config_feeds_the_factory() {
        let cfg: Config = toml::from_str(EXTENDED).expect("parse");
        let factory = cfg.factory();

        assert_eq!(factory.processor("turbo").map(|s| s.name.as_str()), Some("turbo"));
        let racer = factory.build("racer").expect("racer builds");
        assert!(racer.run().is_ok());
        assert!(racer
            .validate(&InstructionBatch::new().with_actions(["move", "turn", "turn", "shoot"]))
            .is_ok());

        // Built-ins are still available.
        assert!(factory.build("tank").is_ok());
    }

    #[test]
    fn model_with_unknown_preset_fails_at_build() {
        let cfg: Config = toml::from_str(
            r#"
            [[models]]
            name = "ghost"
            engine = "none"
            memory = "none"
            sensors = ["radar"]
            processor = "missing"
            "#,
        )
        .expect("parse");
        assert_eq!(
            cfg.factory().build("ghost").unwrap_err(),
            RobotError::ModelNotFound("missing".into())
        );
    }

    #[test]
    fn misspelled_config_key_is_rejected() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[processors.turbo]\nmax_event_count = 3\n").expect("write");
        let err = load_from(&path).unwrap_err();
        assert!(err.contains("unknown field"), "got: {err}");

        let top_level: Result<Config, _> = toml::from_str("defualt_model = \"tank\"");
        assert!(top_level.is_err());
    }

    #[test]
    fn malformed_config_is_reported() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_model = [").expect("write");
        let err = load_from(&path).unwrap_err();
        assert!(err.contains("Failed to parse config"));
    }

    #[test]
    fn apply_env_overrides_changes_default_model() {
        // SAFETY: single-threaded test; no data races on env vars.
        unsafe { std::env::set_var("ROBOTS_DEFAULT_MODEL", "tank") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.default_model, "tank");
        unsafe { std::env::remove_var("ROBOTS_DEFAULT_MODEL") };
    }
}
