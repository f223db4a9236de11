//! Where recipes come from.
//!
//! The resolver only sees the [`RecipeSource`] trait. Two implementations are
//! provided: [`MemorySource`] for embedding and tests, and [`DirectorySource`]
//! which reads recipe files laid out as `<root>/<source>/<org>/<recipe>.toml`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;
use tracing::debug;

use pantry_core::identifier::{RecipeIdentifier, DEFAULT_SOURCE};
use pantry_core::recipe::Recipe;
use pantry_process::Process;
use pantry_util::hash;

use crate::event::Event;

/// Directory used for recipe identifiers without a source. No sourced
/// identifier can map here because the source name is reserved.
pub const DEFAULT_SOURCE_DIR: &str = DEFAULT_SOURCE;

/// Fetches recipes by identifier.
///
/// Must be safe to call concurrently for distinct identifiers.
pub trait RecipeSource: Send + Sync {
    fn fetch(&self, recipe: &RecipeIdentifier) -> Process<Event, Recipe, FetchError>;
}

/// A recipe could not be fetched.
#[derive(Debug, Error, Diagnostic)]
pub enum FetchError {
    #[error("recipe {recipe} was not found")]
    #[diagnostic(help("check the identifier, or add the directory holding it to [recipes] paths"))]
    NotFound { recipe: RecipeIdentifier },

    #[error("recipe {recipe} has no releases")]
    NoReleases { recipe: RecipeIdentifier },

    #[error("no recipe file for {recipe} at {}", path.display())]
    ManifestMissing {
        recipe: RecipeIdentifier,
        path: PathBuf,
    },

    #[error("invalid recipe file {}: {reason}", path.display())]
    #[diagnostic(help("recipe files are TOML with `name`, `url` and a [versions] table"))]
    ManifestInvalid {
        recipe: RecipeIdentifier,
        path: PathBuf,
        reason: String,
    },

    #[error("failed to read recipe {recipe}")]
    Io {
        recipe: RecipeIdentifier,
        #[source]
        source: std::io::Error,
    },
}

/// Recipes held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    recipes: BTreeMap<RecipeIdentifier, Recipe>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: RecipeIdentifier, recipe: Recipe) {
        self.recipes.insert(id, recipe);
    }

    pub fn with_recipe(mut self, id: RecipeIdentifier, recipe: Recipe) -> Self {
        self.insert(id, recipe);
        self
    }
}

impl RecipeSource for MemorySource {
    fn fetch(&self, recipe: &RecipeIdentifier) -> Process<Event, Recipe, FetchError> {
        let fetching = Event::Fetching {
            recipe: recipe.clone(),
        };
        match self.recipes.get(recipe) {
            Some(found) if found.versions.is_empty() => Process::error(FetchError::NoReleases {
                recipe: recipe.clone(),
            }),
            Some(found) => Process::just_with(vec![fetching], found.clone()),
            None => Process::error(FetchError::NotFound {
                recipe: recipe.clone(),
            }),
        }
    }
}

/// Recipe files on disk, searched across one or more roots in order.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    roots: Vec<PathBuf>,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![root.into()],
        }
    }

    /// Search `roots` in order; the first root holding the recipe wins.
    pub fn with_roots<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Where the file for `recipe` lives under `root`.
    pub fn recipe_path(root: &Path, recipe: &RecipeIdentifier) -> PathBuf {
        let source = recipe.source().map_or(DEFAULT_SOURCE_DIR, |s| s.as_str());
        root.join(source)
            .join(recipe.organization().as_str())
            .join(format!("{}.toml", recipe.recipe()))
    }
}

impl RecipeSource for DirectorySource {
    fn fetch(&self, recipe: &RecipeIdentifier) -> Process<Event, Recipe, FetchError> {
        debug!("Fetching recipe {recipe} from {} root(s)", self.roots.len());
        let fetching = Event::Fetching {
            recipe: recipe.clone(),
        };
        let read = Process::from_future(read_recipe_file(self.roots.clone(), recipe.clone()));
        let recipe = recipe.clone();
        Process::just_with(vec![fetching], ())
            .concat(read)
            .chain(move |(path, bytes)| parse_recipe_file(recipe, path, bytes))
    }
}

async fn read_recipe_file(
    roots: Vec<PathBuf>,
    recipe: RecipeIdentifier,
) -> Result<(PathBuf, Vec<u8>), FetchError> {
    let mut organization_seen = None;
    for root in &roots {
        let path = DirectorySource::recipe_path(root, &recipe);
        match tokio::fs::read(&path).await {
            Ok(bytes) => return Ok((path, bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if organization_seen.is_none() && is_dir(path.parent()).await {
                    organization_seen = Some(path);
                }
            }
            Err(source) => return Err(FetchError::Io { recipe, source }),
        }
    }
    Err(match organization_seen {
        Some(path) => FetchError::ManifestMissing { recipe, path },
        None => FetchError::NotFound { recipe },
    })
}

async fn is_dir(path: Option<&Path>) -> bool {
    match path {
        Some(path) => tokio::fs::metadata(path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false),
        None => false,
    }
}

fn parse_recipe_file(
    recipe: RecipeIdentifier,
    path: PathBuf,
    bytes: Vec<u8>,
) -> Process<Event, Recipe, FetchError> {
    let events = vec![
        Event::FileRead {
            path: path.clone(),
            bytes: bytes.len() as u64,
        },
        Event::FileHashed {
            path: path.clone(),
            sha256: hash::sha256_bytes(&bytes),
        },
    ];
    let parsed = parse_recipe(recipe, path, &bytes);
    Process::just_with(events, ()).chain(move |_| Process::from_result(parsed))
}

fn parse_recipe(
    recipe: RecipeIdentifier,
    path: PathBuf,
    bytes: &[u8],
) -> Result<Recipe, FetchError> {
    let invalid = |reason: String| FetchError::ManifestInvalid {
        recipe: recipe.clone(),
        path: path.clone(),
        reason,
    };
    let text = std::str::from_utf8(bytes).map_err(|e| invalid(e.to_string()))?;
    let parsed = Recipe::parse_toml(text).map_err(|e| invalid(e.message().to_string()))?;
    for (version, recipe_version) in &parsed.versions {
        if let Some(bad) = recipe_version
            .pinned_hashes()
            .into_iter()
            .find(|h| !hash::is_sha256_hex(h))
        {
            return Err(invalid(format!("version {version} pins malformed sha256 '{bad}'")));
        }
    }
    if parsed.versions.is_empty() {
        return Err(FetchError::NoReleases { recipe });
    }
    Ok(parsed)
}
