use crate::matcher::score;
use crate::Recipe;

mod model;

pub use model::{RankOptions, RankedRecipe};

/// Default number of missing ingredients still considered "almost makeable"
pub const DEFAULT_MAX_MISSING: usize = 2;

/// Match every recipe against `available`, then filter and order per `options`.
///
/// Input recipes are cloned into the result, never modified.
pub fn rank_by_match<S: AsRef<str>>(
    recipes: &[Recipe],
    available: &[S],
    options: &RankOptions,
) -> Vec<RankedRecipe> {
    let mut ranked: Vec<RankedRecipe> = recipes
        .iter()
        .map(|recipe| RankedRecipe {
            matching: score(&recipe.ingredients, available),
            recipe: recipe.clone(),
        })
        .filter(|r| {
            options
                .min_match_percent
                .map_or(true, |min| r.match_percentage() >= min)
        })
        .filter(|r| !options.only_makeable || r.match_percentage() >= options.can_make_threshold)
        .collect();

    if options.sort_by_match {
        sort_by_match(&mut ranked);
    }
    ranked
}

/// Recipes missing at least one and at most `max_missing` ingredients,
/// best matches first.
pub fn almost_makeable<S: AsRef<str>>(
    recipes: &[Recipe],
    available: &[S],
    max_missing: usize,
) -> Vec<RankedRecipe> {
    rank_by_match(recipes, available, &RankOptions::default())
        .into_iter()
        .filter(|r| (1..=max_missing).contains(&r.matching.missing_count()))
        .collect()
}

/// The highest scoring recipe, or `None` when there are no recipes.
///
/// Ties go to the recipe that comes first in the input.
pub fn best_match<S: AsRef<str>>(recipes: &[Recipe], available: &[S]) -> Option<RankedRecipe> {
    rank_by_match(recipes, available, &RankOptions::default())
        .into_iter()
        .next()
}

fn sort_by_match(ranked: &mut [RankedRecipe]) {
    ranked.sort_by(|a, b| b.match_percentage().cmp(&a.match_percentage()));
}
