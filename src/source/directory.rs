use super::{RecipeSource, SourceError};
use crate::{Recipe, RecipeId};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;
use tracing::debug;

const RECIPE_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Recipe source loaded from a directory of recipe files.
///
/// Every `.yaml`, `.yml` or `.json` file below the base directory holds one
/// recipe. Files are read once, when the source is opened, and served from
/// memory afterwards in path order.
///
/// # Examples
///
/// ```no_run
/// use pantry_match::{DirectoryRecipeSource, RecipeSource};
/// use camino::Utf8Path;
///
/// let source = DirectoryRecipeSource::open(Utf8Path::new("./recipes"))?;
/// let quick = source.find_quick_recipes(30)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryRecipeSource {
    base_dir: Utf8PathBuf,
    recipes: Vec<Recipe>,
}

impl DirectoryRecipeSource {
    /// Load every recipe file below `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if a file cannot be read or parsed, if a recipe
    /// has no ingredients or a zero preparation time, or if two files share
    /// a recipe id. A missing directory yields an empty source.
    pub fn open(base_dir: &Utf8Path) -> Result<Self, SourceError> {
        let mut paths = Vec::new();
        for ext in RECIPE_EXTENSIONS {
            let pattern = base_dir.join(format!("**/*.{ext}"));
            for entry in glob::glob(pattern.as_str())? {
                let path = Utf8PathBuf::from_path_buf(entry?).map_err(|p| {
                    SourceError::InvalidPath(format!(
                        "Path contains invalid UTF-8: {}",
                        p.display()
                    ))
                })?;
                paths.push(path);
            }
        }
        paths.sort();

        let mut seen: HashSet<RecipeId> = HashSet::new();
        let mut recipes = Vec::with_capacity(paths.len());
        for path in paths {
            let recipe = read_recipe(&path)?;
            validate_recipe(&recipe)?;
            if !seen.insert(recipe.id) {
                return Err(SourceError::DuplicateId(recipe.id));
            }
            recipes.push(recipe);
        }

        debug!(base_dir = %base_dir, count = recipes.len(), "loaded recipe files");

        Ok(Self {
            base_dir: base_dir.to_owned(),
            recipes,
        })
    }

    pub fn base_dir(&self) -> &Utf8Path {
        &self.base_dir
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl RecipeSource for DirectoryRecipeSource {
    fn find_all(&self) -> Result<Vec<Recipe>, SourceError> {
        Ok(self.recipes.clone())
    }

    fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, SourceError> {
        Ok(self.recipes.iter().find(|r| r.id == id).cloned())
    }
}

fn read_recipe(path: &Utf8Path) -> Result<Recipe, SourceError> {
    let content = std::fs::read_to_string(path)?;
    if path.extension() == Some("json") {
        serde_json::from_str(&content).map_err(|source| SourceError::JsonError {
            path: path.to_owned(),
            source,
        })
    } else {
        serde_yaml::from_str(&content).map_err(|source| SourceError::YamlError {
            path: path.to_owned(),
            source,
        })
    }
}

fn validate_recipe(recipe: &Recipe) -> Result<(), SourceError> {
    let invalid = |reason: &str| SourceError::InvalidRecipe {
        id: recipe.id,
        reason: reason.to_string(),
    };
    if recipe.ingredients.is_empty() {
        return Err(invalid("recipe has no ingredients"));
    }
    if recipe.prep_time_minutes == 0 {
        return Err(invalid("preparation time must be positive"));
    }
    Ok(())
}
