//! Use-case layer: fetches from the sources, validates input and hands the
//! data to the pure matching, search and recommendation functions.

use crate::config::EngineConfig;
use crate::insights::{similar_to_favorites, RecipeFilter};
use crate::ranker::{almost_makeable, best_match, rank_by_match, RankOptions, RankedRecipe};
use crate::recommend::{
    self, blend, validate_limit, RecommendError, RecommendedRecipe, Strategy, StrategyResults,
};
use crate::search::{search, search_with_relevance, SearchOptions, SearchResult};
use crate::source::{PantrySource, RecipeSource, SourceError};
use crate::{available_ingredients, Recipe, RecipeId};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Recipe not found: {0}")]
    NotFound(RecipeId),

    #[error("Failed to fetch data: {0}")]
    Source(#[from] SourceError),

    #[error("Invalid argument: {0}")]
    Recommend(#[from] RecommendError),
}

impl ServiceError {
    /// Whether the error was caused by the caller's input
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            ServiceError::InvalidArgument(_) | ServiceError::Recommend(_)
        )
    }
}

fn validate_user_id(user_id: &str) -> Result<&str, ServiceError> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidArgument(
            "user id must not be blank".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Replace a failed strategy input with an empty one
fn degrade<T: Default>(input: &str, result: Result<T, SourceError>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(input, error = %e, "recommendation input unavailable, continuing without it");
            T::default()
        }
    }
}

/// Recipe matching and recommendation over a recipe and a pantry source.
///
/// # Examples
///
/// ```
/// use pantry_match::{
///     InMemoryPantrySource, InMemoryRecipeSource, PantryItem, Recipe, Recommender,
/// };
///
/// let recipe: Recipe = serde_json::from_str(
///     r#"{"id": 1, "title": "Arroz", "ingredients": ["Arroz", "Sal"], "prepTimeMinutes": 20}"#,
/// )?;
/// let pantry = InMemoryPantrySource::new().with_pantry(
///     "ana",
///     vec![PantryItem::new("arroz", None), PantryItem::new("sal", Some(30))],
/// );
/// let recommender = Recommender::new(InMemoryRecipeSource::new(vec![recipe]), pantry);
///
/// let recommendations = recommender.recommend_for_user("ana", &[], 10)?;
/// assert_eq!(recommendations[0].score, 100.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Recommender<R, P> {
    recipes: R,
    pantry: P,
    config: EngineConfig,
}

impl<R: RecipeSource, P: PantrySource> Recommender<R, P> {
    pub fn new(recipes: R, pantry: P) -> Self {
        Self::with_config(recipes, pantry, EngineConfig::default())
    }

    pub fn with_config(recipes: R, pantry: P, config: EngineConfig) -> Self {
        Self {
            recipes,
            pantry,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Names of the user's non-expired pantry items.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a blank user id, `Source` if the pantry cannot
    /// be fetched.
    pub fn available_for(&self, user_id: &str) -> Result<Vec<String>, ServiceError> {
        let user_id = validate_user_id(user_id)?;
        let items = self.pantry.find_by_user_id(user_id)?;
        Ok(available_ingredients(&items))
    }

    /// Blended recommendations for a user.
    ///
    /// Each strategy's input is fetched on its own; if a fetch fails, that
    /// strategy contributes nothing and the others still produce results.
    ///
    /// # Errors
    ///
    /// Fails only for a blank user id or a `limit` outside 1..=50.
    pub fn recommend_for_user(
        &self,
        user_id: &str,
        favorite_ids: &[RecipeId],
        limit: usize,
    ) -> Result<Vec<RecommendedRecipe>, ServiceError> {
        let user_id = validate_user_id(user_id)?;
        validate_limit(limit)?;
        let allocation = &self.config.allocation;

        let catalog = degrade("catalog", self.recipes.find_all());
        let available = degrade(
            "pantry",
            self.pantry
                .find_by_user_id(user_id)
                .map(|items| available_ingredients(&items)),
        );
        let favorites = self.resolve_favorites(favorite_ids);
        let popular = degrade(
            "popular",
            self.recipes.find_popular(allocation.target(Strategy::Popular, limit)),
        );
        let quick = degrade(
            "quick",
            self.recipes.find_quick_recipes(self.config.quick_prep_minutes),
        );

        let results = StrategyResults {
            pantry_based: recommend::pantry_based(
                &catalog,
                &available,
                self.config.pantry_min_match,
            ),
            favorites_based: recommend::favorites_based(&similar_to_favorites(
                &favorites, &catalog,
            )),
            popular: recommend::popular(&popular),
            quick: recommend::quick(&quick),
        };
        debug!(
            user_id,
            candidates = results.len(),
            pantry_based = results.pantry_based.len(),
            favorites_based = results.favorites_based.len(),
            popular = results.popular.len(),
            quick = results.quick.len(),
            "collected recommendation candidates"
        );

        Ok(blend(results, limit, allocation)?)
    }

    fn resolve_favorites(&self, favorite_ids: &[RecipeId]) -> Vec<Recipe> {
        favorite_ids
            .iter()
            .filter_map(|&id| match self.recipes.find_by_id(id) {
                Ok(Some(recipe)) => Some(recipe),
                Ok(None) => {
                    debug!(id, "favorite recipe no longer exists");
                    None
                }
                Err(e) => {
                    warn!(id, error = %e, "failed to fetch favorite recipe");
                    None
                }
            })
            .collect()
    }

    /// Every recipe matched against the user's pantry, filtered and ordered
    /// per `options`.
    pub fn rank_for_user(
        &self,
        user_id: &str,
        options: &RankOptions,
    ) -> Result<Vec<RankedRecipe>, ServiceError> {
        let available = self.available_for(user_id)?;
        let recipes = self.recipes.find_all()?;
        Ok(rank_by_match(&recipes, &available, options))
    }

    /// Recipes the user can make at the configured threshold.
    pub fn makeable_for_user(&self, user_id: &str) -> Result<Vec<RankedRecipe>, ServiceError> {
        let options = RankOptions {
            only_makeable: true,
            can_make_threshold: self.config.can_make_threshold,
            ..Default::default()
        };
        self.rank_for_user(user_id, &options)
    }

    /// Recipes missing only a few ingredients (`max_missing` from config).
    pub fn almost_makeable_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<RankedRecipe>, ServiceError> {
        let available = self.available_for(user_id)?;
        let recipes = self.recipes.find_all()?;
        Ok(almost_makeable(&recipes, &available, self.config.max_missing))
    }

    /// The single best match for the user, `None` when there are no recipes.
    pub fn best_match_for_user(&self, user_id: &str) -> Result<Option<RankedRecipe>, ServiceError> {
        let available = self.available_for(user_id)?;
        let recipes = self.recipes.find_all()?;
        Ok(best_match(&recipes, &available))
    }

    pub fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<Recipe>, ServiceError> {
        let recipes = self.recipes.find_all()?;
        Ok(search(&recipes, query, options))
    }

    pub fn search_with_relevance(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>, ServiceError> {
        let recipes = self.recipes.find_all()?;
        Ok(search_with_relevance(&recipes, query, options))
    }

    /// Recipes matching every set field of `filter`, in source order.
    pub fn browse(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, ServiceError> {
        let recipes = match &filter.tag {
            Some(tag) => self.recipes.find_by_tag(tag)?,
            None => self.recipes.find_all()?,
        };
        Ok(filter.apply(&recipes))
    }

    /// Recipes similar to a known recipe, most similar first.
    ///
    /// # Errors
    ///
    /// `NotFound` if no recipe has `recipe_id`, `Recommend` for a `limit`
    /// outside 1..=50.
    pub fn similar_to(
        &self,
        recipe_id: RecipeId,
        limit: usize,
    ) -> Result<Vec<RecommendedRecipe>, ServiceError> {
        validate_limit(limit)?;
        let recipe = self
            .recipes
            .find_by_id(recipe_id)?
            .ok_or(ServiceError::NotFound(recipe_id))?;
        let catalog = self.recipes.find_all()?;

        let mut similar = recommend::favorites_based(&similar_to_favorites(&[recipe], &catalog));
        similar.truncate(limit);
        Ok(similar)
    }
}
