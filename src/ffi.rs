//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe records and functions for use with UniFFI.
//! Recipes cross the boundary by value; richer types are flattened into
//! plain records.

use crate::ranker::{rank_by_match, RankOptions, RankedRecipe};
use crate::recommend::RecommendedRecipe;
use crate::search::{search_with_relevance, SearchOptions, SearchResult};
use crate::service::{Recommender, ServiceError};
use crate::source::{
    DirectoryRecipeSource, InMemoryPantrySource, InMemoryRecipeSource, RecipeSource, SourceError,
};
use crate::{can_make, score, MatchResult, PantryItem, Recipe, DEFAULT_CAN_MAKE_THRESHOLD};
use camino::Utf8Path;

/// User id under which the caller-supplied pantry is registered
const LOCAL_USER: &str = "local";

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum PantryMatchError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Source error: {message}")]
    SourceError { message: String },
}

impl From<ServiceError> for PantryMatchError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidArgument(message) => PantryMatchError::InvalidArgument { message },
            ServiceError::Recommend(e) => PantryMatchError::InvalidArgument {
                message: e.to_string(),
            },
            ServiceError::NotFound(id) => PantryMatchError::NotFound {
                message: format!("Recipe not found: {id}"),
            },
            ServiceError::Source(e) => e.into(),
        }
    }
}

impl From<SourceError> for PantryMatchError {
    fn from(e: SourceError) -> Self {
        PantryMatchError::SourceError {
            message: e.to_string(),
        }
    }
}

/// FFI-safe representation of a recipe.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipe {
    pub id: i64,
    pub title: String,
    pub ingredients: Vec<String>,
    pub tags: Vec<String>,
    pub prep_time_minutes: u32,
    pub calories: Option<u32>,
    pub difficulty: String,
    pub meal_type: String,
    pub popularity: Option<u32>,
}

impl From<FfiRecipe> for Recipe {
    fn from(r: FfiRecipe) -> Self {
        Recipe {
            id: r.id,
            title: r.title,
            ingredients: r.ingredients,
            tags: r.tags,
            prep_time_minutes: r.prep_time_minutes,
            calories: r.calories,
            difficulty: r.difficulty,
            meal_type: r.meal_type,
            popularity: r.popularity,
        }
    }
}

impl From<Recipe> for FfiRecipe {
    fn from(r: Recipe) -> Self {
        FfiRecipe {
            id: r.id,
            title: r.title,
            ingredients: r.ingredients,
            tags: r.tags,
            prep_time_minutes: r.prep_time_minutes,
            calories: r.calories,
            difficulty: r.difficulty,
            meal_type: r.meal_type,
            popularity: r.popularity,
        }
    }
}

/// FFI-safe representation of a match result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMatchResult {
    pub match_percentage: u8,
    pub available_ingredients: Vec<String>,
    pub missing_ingredients: Vec<String>,
}

impl From<MatchResult> for FfiMatchResult {
    fn from(m: MatchResult) -> Self {
        FfiMatchResult {
            match_percentage: m.match_percentage,
            available_ingredients: m.available_ingredients,
            missing_ingredients: m.missing_ingredients,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRankedRecipe {
    pub recipe: FfiRecipe,
    pub matching: FfiMatchResult,
}

impl From<RankedRecipe> for FfiRankedRecipe {
    fn from(r: RankedRecipe) -> Self {
        FfiRankedRecipe {
            recipe: r.recipe.into(),
            matching: r.matching.into(),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecommendation {
    pub recipe: FfiRecipe,
    pub score: f64,
    pub reason: String,
    /// One of `pantry-based`, `favorites-based`, `popular`, `quick`, `seasonal`
    pub strategy: String,
}

impl From<RecommendedRecipe> for FfiRecommendation {
    fn from(r: RecommendedRecipe) -> Self {
        FfiRecommendation {
            recipe: r.recipe.into(),
            score: r.score,
            reason: r.reason,
            strategy: r.strategy.to_string(),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSearchResult {
    pub recipe: FfiRecipe,
    pub relevance_score: f64,
    /// Matched fields: `title`, `ingredients` and/or `tags`
    pub matched_in: Vec<String>,
}

impl From<SearchResult> for FfiSearchResult {
    fn from(r: SearchResult) -> Self {
        let matched_in = r
            .matched_in
            .iter()
            .map(|field| field.as_str().to_string())
            .collect();
        FfiSearchResult {
            recipe: r.recipe.into(),
            relevance_score: r.relevance_score,
            matched_in,
        }
    }
}

fn to_recipes(recipes: Vec<FfiRecipe>) -> Vec<Recipe> {
    recipes.into_iter().map(Recipe::from).collect()
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Matches a recipe's ingredients against the available ingredient names.
#[uniffi::export]
pub fn match_ingredients(ingredients: Vec<String>, available: Vec<String>) -> FfiMatchResult {
    score(&ingredients, &available).into()
}

/// Returns true if the match percentage reaches `threshold`.
#[uniffi::export]
pub fn can_make_recipe(ingredients: Vec<String>, available: Vec<String>, threshold: u8) -> bool {
    can_make(&ingredients, &available, threshold)
}

/// Matches every recipe against the available ingredients, best first.
///
/// # Arguments
/// * `min_match_percent` - Drop recipes below this percentage
/// * `only_makeable` - Keep only recipes at or above `can_make_threshold`
/// * `can_make_threshold` - Makeable threshold in percent, 80 when `None`
#[uniffi::export]
pub fn rank_recipes(
    recipes: Vec<FfiRecipe>,
    available: Vec<String>,
    min_match_percent: Option<u8>,
    only_makeable: bool,
    can_make_threshold: Option<u8>,
) -> Vec<FfiRankedRecipe> {
    let options = RankOptions {
        min_match_percent,
        only_makeable,
        can_make_threshold: can_make_threshold.unwrap_or(DEFAULT_CAN_MAKE_THRESHOLD),
        ..Default::default()
    };
    rank_by_match(&to_recipes(recipes), &available, &options)
        .into_iter()
        .map(FfiRankedRecipe::from)
        .collect()
}

/// Searches recipes by title, ingredients and tags, ordered by relevance.
#[uniffi::export]
pub fn search_recipes(
    recipes: Vec<FfiRecipe>,
    query: String,
    include_ingredients: bool,
    include_tags: bool,
) -> Vec<FfiSearchResult> {
    let options = SearchOptions {
        include_ingredients,
        include_tags,
    };
    search_with_relevance(&to_recipes(recipes), &query, &options)
        .into_iter()
        .map(FfiSearchResult::from)
        .collect()
}

/// Recommends recipes from an on-device catalog and pantry.
///
/// # Arguments
/// * `recipes` - The recipe catalog
/// * `available` - Names of the non-expired pantry items
/// * `favorite_ids` - Ids of the user's favorite recipes
/// * `limit` - Number of recommendations, 1 to 50
///
/// # Returns
/// The blended recommendations, or an error for an invalid limit.
#[uniffi::export]
pub fn recommend_recipes(
    recipes: Vec<FfiRecipe>,
    available: Vec<String>,
    favorite_ids: Vec<i64>,
    limit: u32,
) -> Result<Vec<FfiRecommendation>, PantryMatchError> {
    let items = available
        .into_iter()
        .map(|name| PantryItem::new(name, None))
        .collect();
    let recommender = Recommender::new(
        InMemoryRecipeSource::new(to_recipes(recipes)),
        InMemoryPantrySource::new().with_pantry(LOCAL_USER, items),
    );

    let recommendations =
        recommender.recommend_for_user(LOCAL_USER, &favorite_ids, limit as usize)?;
    Ok(recommendations
        .into_iter()
        .map(FfiRecommendation::from)
        .collect())
}

/// Loads every recipe file (.yaml, .yml, .json) below a directory.
#[uniffi::export]
pub fn load_recipes(base_dir: String) -> Result<Vec<FfiRecipe>, PantryMatchError> {
    let source = DirectoryRecipeSource::open(Utf8Path::new(&base_dir))?;
    Ok(source
        .find_all()?
        .into_iter()
        .map(FfiRecipe::from)
        .collect())
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    fn ffi_recipe(id: i64, title: &str, ingredients: &[&str], tags: &[&str]) -> FfiRecipe {
        FfiRecipe {
            id,
            title: title.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            prep_time_minutes: 20,
            calories: None,
            difficulty: "easy".to_string(),
            meal_type: "dinner".to_string(),
            popularity: None,
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_match_ingredients() {
        let result = match_ingredients(
            strings(&["Arroz", "Feijão", "Sal"]),
            strings(&["arroz", "sal", "pimenta"]),
        );
        assert_eq!(result.match_percentage, 67);
        assert_eq!(result.missing_ingredients, vec!["Feijão"]);

        assert!(!can_make_recipe(
            strings(&["Arroz", "Feijão", "Sal"]),
            strings(&["arroz", "sal"]),
            80
        ));
    }

    #[test]
    fn test_rank_recipes() {
        let recipes = vec![
            ffi_recipe(1, "Feijão", &["Feijão", "Bacon"], &[]),
            ffi_recipe(2, "Arroz", &["Arroz"], &[]),
        ];
        let ranked = rank_recipes(recipes, strings(&["arroz"]), None, false, None);
        assert_eq!(ranked[0].recipe.id, 2);
        assert_eq!(ranked[0].matching.match_percentage, 100);
        assert_eq!(ranked[1].matching.match_percentage, 0);
    }

    #[test]
    fn test_rank_recipes_with_threshold() {
        let recipes = vec![
            ffi_recipe(1, "Feijão", &["Feijão", "Arroz"], &[]),
            ffi_recipe(2, "Arroz", &["Arroz"], &[]),
            ffi_recipe(3, "Tutu", &["Feijão", "Farinha", "Bacon"], &[]),
        ];
        let available = strings(&["arroz"]);

        let makeable = rank_recipes(recipes.clone(), available.clone(), None, true, None);
        assert_eq!(makeable.len(), 1);

        let makeable = rank_recipes(recipes, available, None, true, Some(50));
        let ids: Vec<i64> = makeable.iter().map(|r| r.recipe.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_search_recipes() {
        let recipes = vec![
            ffi_recipe(1, "Bolo de Chocolate", &["Chocolate"], &["doce"]),
            ffi_recipe(2, "Mousse", &["Chocolate"], &[]),
        ];
        let results = search_recipes(recipes, "chocolate".to_string(), true, true);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].recipe.id, 1);
        assert_eq!(results[0].matched_in, vec!["title", "ingredients"]);
        assert_eq!(results[1].relevance_score, 25.0);
    }

    #[test]
    fn test_recommend_recipes() {
        let recipes = vec![
            ffi_recipe(1, "Arroz", &["Arroz", "Sal"], &[]),
            ffi_recipe(2, "Feijão", &["Feijão"], &[]),
        ];
        let recommendations =
            recommend_recipes(recipes, strings(&["arroz", "sal"]), vec![], 10).unwrap();

        assert_eq!(recommendations[0].recipe.id, 1);
        assert_eq!(recommendations[0].strategy, "pantry-based");
        assert_eq!(recommendations.len(), 2);
    }

    #[test]
    fn test_recommend_recipes_invalid_limit() {
        let err = recommend_recipes(vec![], vec![], vec![], 51).unwrap_err();
        assert!(matches!(err, PantryMatchError::InvalidArgument { .. }));
    }

    #[test]
    fn test_load_recipes() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = temp_dir.path().to_str().unwrap();
        fs::write(
            format!("{}/pao.yaml", temp_path),
            indoc! {r#"
                id: 11
                title: Pão de Queijo
                ingredients: [Polvilho, Queijo, Ovo, Leite]
                prepTimeMinutes: 40
            "#},
        )
        .unwrap();

        let recipes = load_recipes(temp_path.to_string()).unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Pão de Queijo");
    }

    #[test]
    fn test_library_version() {
        let version = library_version();
        assert!(!version.is_empty());
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }
}
