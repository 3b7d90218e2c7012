//! Configuration loading for quip.
//!
//! Reads `~/.quip/config.toml`. Every section and field is optional; a missing
//! file means defaults everywhere.

use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub use quip_jokes::JokeConfig;

#[derive(Debug, Default, Deserialize)]
pub struct QuipConfig {
    pub app: Option<AppConfig>,
    /// Joke page fetch settings.
    pub jokes: Option<JokeConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// ```toml
/// [app]
/// title = "quip"
/// start_route = "/jokes"
/// high_contrast = false
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Title for pages that declare none.
    pub title: Option<String>,
    /// Route opened at startup when none is given on the command line.
    pub start_route: Option<String>,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
}

impl AppConfig {
    pub const DEFAULT_TITLE: &'static str = "quip";
}

/// Expand `${VAR}` references from the environment. Unset variables expand to
/// the empty string; an unterminated `${` is kept literally.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

impl QuipConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        Self::parse(&content).map_err(|err| {
            tracing::warn!("Failed to parse config at {:?}: {}", path, err);
            ConfigError::Parse {
                path: path.to_path_buf(),
                source: err,
            }
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.app
            .as_ref()
            .and_then(|app| app.title.as_deref())
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or(AppConfig::DEFAULT_TITLE)
    }

    #[must_use]
    pub fn start_route(&self) -> Option<&str> {
        self.app.as_ref().and_then(|app| app.start_route.as_deref())
    }

    #[must_use]
    pub fn high_contrast(&self) -> bool {
        self.app.as_ref().is_some_and(|app| app.high_contrast)
    }

    /// Joke settings with `${VAR}` references in string fields expanded.
    #[must_use]
    pub fn jokes(&self) -> JokeConfig {
        let mut jokes = self.jokes.clone().unwrap_or_default();
        jokes.endpoint = jokes.endpoint.as_deref().map(expand_env_vars);
        jokes.user_agent = jokes.user_agent.as_deref().map(expand_env_vars);
        jokes
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".quip").join("config.toml"))
}
