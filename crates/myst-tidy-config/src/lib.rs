use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Config file at {config_path} has an empty content_path")]
    EmptyContentPath { config_path: PathBuf },
}

/// Settings for a content directory, loaded from `config.toml`.
///
/// Only `content_path` is required; `dry_run` and `extensions` fall back to
/// previewing nothing and the standard markdown extensions.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub content_path: PathBuf,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default = "Config::default_extensions")]
    pub extensions: Vec<String>,
}

impl Config {
    pub fn new(content_path: PathBuf) -> Self {
        Self {
            content_path,
            dry_run: false,
            extensions: Self::default_extensions(),
        }
    }

    /// The file extensions treated as content files when none are configured.
    pub fn default_extensions() -> Vec<String> {
        vec!["md".to_string(), "markdown".to_string()]
    }

    /// Load the config file, or `Ok(None)` when none exists yet.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();

        let text = match std::fs::read_to_string(config_path) {
            Ok(text) => text,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    config_path: config_path.to_path_buf(),
                    source,
                });
            }
        };

        let mut config: Config =
            toml::from_str(&text).map_err(|source| ConfigError::Parse {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if config.content_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyContentPath {
                config_path: config_path.to_path_buf(),
            });
        }
        config.content_path = Self::expand(&config.content_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::config_path())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/myst-tidy");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expand `~` and environment variables in a configured path. Paths that
    /// reference undefined variables are passed through untouched so the
    /// directory validation can name them in its error.
    fn expand(path: &Path) -> PathBuf {
        let raw = path.to_string_lossy();
        match shellexpand::full(&raw) {
            Ok(expanded) => PathBuf::from(expanded.as_ref()),
            Err(_) => path.to_path_buf(),
        }
    }
}
