use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use pantry_util::errors::PantryError;
use pantry_util::fs::{expand_home, home_dir};

/// Environment variable that relocates the Pantry data directory.
pub const PANTRY_HOME_ENV: &str = "PANTRY_HOME";

/// Global user configuration loaded from `~/.pantry/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub recipes: RecipesConfig,

    #[serde(default)]
    pub resolve: ResolveConfig,
}

/// Where recipe files are looked up, from `[recipes]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipesConfig {
    /// Directories searched in order; `~` is expanded. When empty, the
    /// `recipes` directory under the data directory is used.
    #[serde(default)]
    pub paths: Vec<String>,
}

/// Resolver settings from `[resolve]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveConfig {
    #[serde(default)]
    pub strategy: StrategyName,
    /// Memoize recipe fetches for the duration of one resolution.
    #[serde(default = "default_cache")]
    pub cache: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyName::default(),
            cache: default_cache(),
        }
    }
}

fn default_cache() -> bool {
    true
}

/// Named resolution strategies selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyName {
    /// Prefer the resolution with the newest versions.
    #[default]
    Newest,
    /// Prefer the resolution with the fewest recipes.
    Fewest,
}

impl GlobalConfig {
    /// Load the global configuration, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        let path = Self::default_path();
        if path.is_file() {
            tracing::debug!("loading configuration from {}", path.display());
            let content = std::fs::read_to_string(&path).map_err(|e| PantryError::Config {
                message: format!("Failed to read {}: {e}", path.display()),
            })?;
            Self::parse_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            PantryError::Config {
                message: format!("Failed to parse global config: {e}"),
            }
            .into()
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// The configured recipe directories with `~` expanded.
    pub fn recipe_paths(&self) -> Vec<PathBuf> {
        if self.recipes.paths.is_empty() {
            return vec![dirs_path().join("recipes")];
        }
        self.recipes.paths.iter().map(|p| expand_home(p)).collect()
    }
}

/// Returns the Pantry data directory: `$PANTRY_HOME`, or `~/.pantry/`.
pub fn dirs_path() -> PathBuf {
    match std::env::var(PANTRY_HOME_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => home_dir().join(".pantry"),
    }
}
