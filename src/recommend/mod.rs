use crate::insights::count_to_f64;
use crate::matcher::score;
use crate::Recipe;
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

mod model;

pub use model::{RecommendedRecipe, Strategy, StrategyAllocation, StrategyResults};

/// Smallest number of recommendations that may be requested
pub const MIN_LIMIT: usize = 1;
/// Largest number of recommendations that may be requested
pub const MAX_LIMIT: usize = 50;
/// Default minimum match percentage for pantry-based candidates
pub const DEFAULT_PANTRY_MIN_MATCH: u8 = 50;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    #[error("Limit must be between 1 and 50, got {0}")]
    InvalidLimit(usize),
}

pub(crate) fn validate_limit(limit: usize) -> Result<(), RecommendError> {
    if (MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
        Ok(())
    } else {
        Err(RecommendError::InvalidLimit(limit))
    }
}

/// Score for the entry at `rank` of an already ordered source list
fn ranked_score(base: f64, step: f64, rank: usize) -> f64 {
    (base - step * count_to_f64(rank)).max(0.0)
}

/// Candidates scored by how much of each recipe the pantry covers.
///
/// Recipes below `min_match` percent are dropped; the rest are ordered best
/// match first, ties in input order.
pub fn pantry_based<S: AsRef<str>>(
    recipes: &[Recipe],
    available: &[S],
    min_match: u8,
) -> Vec<RecommendedRecipe> {
    let mut candidates: Vec<RecommendedRecipe> = recipes
        .iter()
        .filter_map(|recipe| {
            let pct = score(&recipe.ingredients, available).match_percentage;
            (pct >= min_match).then(|| RecommendedRecipe {
                recipe: recipe.clone(),
                score: f64::from(pct),
                reason: format!("You have {pct}% of the ingredients"),
                strategy: Strategy::PantryBased,
            })
        })
        .collect();
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates
}

/// Candidates from a list ordered by similarity to the user's favorites.
pub fn favorites_based(similar: &[Recipe]) -> Vec<RecommendedRecipe> {
    similar
        .iter()
        .enumerate()
        .map(|(rank, recipe)| RecommendedRecipe {
            recipe: recipe.clone(),
            score: ranked_score(100.0, 5.0, rank),
            reason: "Similar to your favorites".to_string(),
            strategy: Strategy::FavoritesBased,
        })
        .collect()
}

/// Candidates from a list ordered by popularity.
pub fn popular(recipes: &[Recipe]) -> Vec<RecommendedRecipe> {
    recipes
        .iter()
        .enumerate()
        .map(|(rank, recipe)| RecommendedRecipe {
            recipe: recipe.clone(),
            score: ranked_score(80.0, 3.0, rank),
            reason: "Popular with other cooks".to_string(),
            strategy: Strategy::Popular,
        })
        .collect()
}

/// Candidates from a list ordered by preparation time.
pub fn quick(recipes: &[Recipe]) -> Vec<RecommendedRecipe> {
    recipes
        .iter()
        .enumerate()
        .map(|(rank, recipe)| RecommendedRecipe {
            recipe: recipe.clone(),
            score: ranked_score(70.0, 2.0, rank),
            reason: format!("Ready in {}", format_prep_time(recipe.prep_time_minutes)),
            strategy: Strategy::Quick,
        })
        .collect()
}

/// Human readable preparation time: `45 min`, `1 h`, `1 h 30 min`.
pub fn format_prep_time(minutes: u32) -> String {
    let (hours, rest) = (minutes / 60, minutes % 60);
    match (hours, rest) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m} min"),
    }
}

/// Blend strategy candidates into one ranked list using the default allocation.
///
/// See [`blend`].
pub fn recommend(
    results: StrategyResults,
    limit: usize,
) -> Result<Vec<RecommendedRecipe>, RecommendError> {
    blend(results, limit, &StrategyAllocation::default())
}

/// Blend strategy candidates into one ranked list of at most `limit` recipes.
///
/// Each strategy contributes at most its allocated share of `limit` (rounded
/// up). The shares are concatenated in priority order (pantry, favorites,
/// popular, quick), only the first occurrence of each recipe id is kept, and
/// the survivors are sorted by descending score (stable) and truncated.
///
/// # Errors
///
/// Returns `RecommendError::InvalidLimit` if `limit` is outside 1..=50.
pub fn blend(
    results: StrategyResults,
    limit: usize,
    allocation: &StrategyAllocation,
) -> Result<Vec<RecommendedRecipe>, RecommendError> {
    validate_limit(limit)?;
    let candidates = results.len();

    let StrategyResults {
        pantry_based,
        favorites_based,
        popular,
        quick,
    } = results;

    let pool: Vec<RecommendedRecipe> = [
        (Strategy::PantryBased, pantry_based),
        (Strategy::FavoritesBased, favorites_based),
        (Strategy::Popular, popular),
        (Strategy::Quick, quick),
    ]
    .into_iter()
    .flat_map(|(strategy, candidates)| {
        candidates
            .into_iter()
            .take(allocation.target(strategy, limit))
    })
    .collect();
    let pool_size = pool.len();

    let mut seen = HashSet::new();
    let mut blended: Vec<RecommendedRecipe> = pool
        .into_iter()
        .filter(|candidate| seen.insert(candidate.recipe.id))
        .collect();
    debug!(
        candidates,
        pool_size,
        unique = blended.len(),
        limit,
        "blended recommendation candidates"
    );

    blended.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    blended.truncate(limit);
    Ok(blended)
}
