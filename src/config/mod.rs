use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Fixture file (.json or .csv); the built-in fixture when unset
    #[serde(default)]
    pub fixture: Option<String>,

    /// Directory that receives reports.csv
    #[serde(default)]
    pub export_dir: Option<String>,

    #[serde(default)]
    pub log_file: Option<String>,
}

impl Config {
    pub fn fixture_path(&self) -> Option<PathBuf> {
        self.fixture.as_deref().and_then(expand_path)
    }

    pub fn export_dir_path(&self) -> Option<PathBuf> {
        self.export_dir.as_deref().and_then(expand_path)
    }

    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file
            .as_deref()
            .and_then(expand_path)
            .or_else(|| data_dir().map(|dir| dir.join("wardwatch.log")))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load from `explicit`, or the first config location that exists.
///
/// A missing file yields defaults. An unreadable or invalid file is an
/// error; callers fall back to defaults and log it once logging is up.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let Some(path) = explicit.map(Path::to_path_buf).or_else(config_path) else {
        return Ok(Config::default());
    };
    load_from(&path)
}

fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.is_file() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(content)
}

/// `$WARDWATCH_CONFIG` when set, otherwise the first existing file among
/// `$XDG_CONFIG_HOME`, `~/.config` and the platform config dir.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("WARDWATCH_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    let platform = directories::ProjectDirs::from("io", "wardwatch", "wardwatch")
        .map(|dirs| dirs.config_dir().to_path_buf());
    let candidates = config_candidates(
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
        platform,
    );
    first_existing(&candidates)
}

fn config_candidates(
    xdg: Option<PathBuf>,
    home: Option<PathBuf>,
    platform: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(xdg) = xdg {
        candidates.push(xdg.join("wardwatch").join("config.toml"));
    }
    if let Some(home) = home {
        candidates.push(home.join(".config").join("wardwatch").join("config.toml"));
    }
    if let Some(dir) = platform {
        candidates.push(dir.join("config.toml"));
    }
    candidates.dedup();
    candidates
}

fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|path| path.is_file()).cloned()
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("wardwatch"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("wardwatch"));
    }
    directories::ProjectDirs::from("io", "wardwatch", "wardwatch")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn expand_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
            return Some(home.join(rest));
        }
    }

    Some(PathBuf::from(trimmed))
}
