//! Read-only data sources the engine draws recipes and pantries from.
//!
//! The engine itself performs no I/O: callers fetch through these traits and
//! hand the resulting collections to the pure matching functions.

use crate::{PantryItem, Recipe, RecipeId};
use camino::Utf8PathBuf;
use std::collections::HashMap;
use thiserror::Error;

mod directory;

pub use directory::DirectoryRecipeSource;

/// Errors that can occur when reading from a recipe or pantry source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to read directory: {0}")]
    GlobError(#[from] glob::GlobError),

    #[error("Failed to create glob pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("Failed to parse YAML recipe {path}: {source}")]
    YamlError {
        path: Utf8PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to parse JSON recipe {path}: {source}")]
    JsonError {
        path: Utf8PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid recipe {id}: {reason}")]
    InvalidRecipe { id: RecipeId, reason: String },

    #[error("Duplicate recipe id {0}")]
    DuplicateId(RecipeId),

    #[error("Source unavailable: {0}")]
    Unavailable(String),
}

/// Access to the recipe collection.
///
/// Only [`find_all`](RecipeSource::find_all) and
/// [`find_by_id`](RecipeSource::find_by_id) are required; the filtered views
/// have default implementations on top of `find_all` that a backend with
/// server-side queries can override.
pub trait RecipeSource {
    fn find_all(&self) -> Result<Vec<Recipe>, SourceError>;

    /// `Ok(None)` when no recipe has that id
    fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, SourceError>;

    /// Most favourited recipes first; recipes without a popularity count last.
    fn find_popular(&self, limit: usize) -> Result<Vec<Recipe>, SourceError> {
        let mut recipes = self.find_all()?;
        recipes.sort_by(|a, b| b.popularity.cmp(&a.popularity));
        recipes.truncate(limit);
        Ok(recipes)
    }

    /// Recipes ready within `max_prep_minutes`, fastest first.
    fn find_quick_recipes(&self, max_prep_minutes: u32) -> Result<Vec<Recipe>, SourceError> {
        let mut recipes: Vec<Recipe> = self
            .find_all()?
            .into_iter()
            .filter(|r| r.prep_time_minutes <= max_prep_minutes)
            .collect();
        recipes.sort_by_key(|r| r.prep_time_minutes);
        Ok(recipes)
    }

    fn find_by_tag(&self, tag: &str) -> Result<Vec<Recipe>, SourceError> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|r| r.has_tag(tag))
            .collect())
    }
}

/// Access to users' pantries.
pub trait PantrySource {
    fn find_by_user_id(&self, user_id: &str) -> Result<Vec<PantryItem>, SourceError>;
}

/// Recipe source backed by a vector, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecipeSource {
    recipes: Vec<Recipe>,
}

impl InMemoryRecipeSource {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }
}

impl RecipeSource for InMemoryRecipeSource {
    fn find_all(&self) -> Result<Vec<Recipe>, SourceError> {
        Ok(self.recipes.clone())
    }

    fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, SourceError> {
        Ok(self.recipes.iter().find(|r| r.id == id).cloned())
    }
}

/// Pantry source backed by a map of user id to items.
///
/// Unknown users have an empty pantry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPantrySource {
    pantries: HashMap<String, Vec<PantryItem>>,
}

impl InMemoryPantrySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pantry(mut self, user_id: impl Into<String>, items: Vec<PantryItem>) -> Self {
        self.pantries.insert(user_id.into(), items);
        self
    }
}

impl PantrySource for InMemoryPantrySource {
    fn find_by_user_id(&self, user_id: &str) -> Result<Vec<PantryItem>, SourceError> {
        Ok(self.pantries.get(user_id).cloned().unwrap_or_default())
    }
}
