//! Catalog-level views over a recipe collection.
//!
//! Frequency counts, main-ingredient grouping, attribute filters and the
//! "similar to favorites" ordering used by the favorites strategy.

use crate::{Recipe, RecipeId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

#[inline]
pub(crate) fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// How often each tag appears across `recipes`, most common first.
///
/// Tags are compared case-insensitively and reported lower-cased. Equal
/// counts are ordered by name.
pub fn tag_frequency(recipes: &[Recipe]) -> Vec<(String, usize)> {
    frequency(recipes.iter().flat_map(|r| r.tags.iter()))
}

/// How often each ingredient appears across `recipes`, most common first.
pub fn ingredient_frequency(recipes: &[Recipe]) -> Vec<(String, usize)> {
    frequency(recipes.iter().flat_map(|r| r.ingredients.iter()))
}

fn frequency<'a>(names: impl Iterator<Item = &'a String>) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for name in names {
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        *counts.entry(key).or_default() += 1;
    }

    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Group recipes by their lower-cased main (first) ingredient.
///
/// Recipes without ingredients are left out. Each group keeps input order.
pub fn group_by_main_ingredient(recipes: &[Recipe]) -> BTreeMap<String, Vec<Recipe>> {
    let mut groups: BTreeMap<String, Vec<Recipe>> = BTreeMap::new();
    for recipe in recipes {
        if let Some(main) = recipe.main_ingredient() {
            groups
                .entry(main.to_lowercase())
                .or_default()
                .push(recipe.clone());
        }
    }
    groups
}

/// Attribute filter over a recipe list. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecipeFilter {
    pub tag: Option<String>,
    pub meal_type: Option<String>,
    pub difficulty: Option<String>,
    pub max_prep_minutes: Option<u32>,
    /// Recipes without a calorie count never pass this cap
    pub max_calories: Option<u32>,
}

impl RecipeFilter {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(tag) = &self.tag {
            if !recipe.has_tag(tag) {
                return false;
            }
        }
        if let Some(meal_type) = &self.meal_type {
            if !recipe.meal_type.eq_ignore_ascii_case(meal_type) {
                return false;
            }
        }
        if let Some(difficulty) = &self.difficulty {
            if !recipe.difficulty.eq_ignore_ascii_case(difficulty) {
                return false;
            }
        }
        if let Some(max) = self.max_prep_minutes {
            if recipe.prep_time_minutes > max {
                return false;
            }
        }
        if let Some(max) = self.max_calories {
            match recipe.calories {
                Some(calories) if calories <= max => {}
                _ => return false,
            }
        }
        true
    }

    pub fn apply(&self, recipes: &[Recipe]) -> Vec<Recipe> {
        recipes
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

/// Order `candidates` by similarity to the user's `favorites`, most similar first.
///
/// A candidate's similarity is the best, over all favorites, of tag Jaccard
/// plus ingredient Jaccard (both case-insensitive). Favorites themselves and
/// candidates with no overlap at all are left out.
pub fn similar_to_favorites(favorites: &[Recipe], candidates: &[Recipe]) -> Vec<Recipe> {
    if favorites.is_empty() {
        return Vec::new();
    }

    let favorite_ids: HashSet<RecipeId> = favorites.iter().map(|r| r.id).collect();
    let favorite_sets: Vec<(HashSet<String>, HashSet<String>)> =
        favorites.iter().map(feature_sets).collect();

    let mut scored: Vec<(f64, &Recipe)> = candidates
        .iter()
        .filter(|r| !favorite_ids.contains(&r.id))
        .filter_map(|candidate| {
            let (tags, ingredients) = feature_sets(candidate);
            let similarity = favorite_sets
                .iter()
                .map(|(fav_tags, fav_ingredients)| {
                    jaccard_similarity(&tags, fav_tags)
                        + jaccard_similarity(&ingredients, fav_ingredients)
                })
                .fold(0.0, f64::max);
            (similarity > 0.0).then_some((similarity, candidate))
        })
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().map(|(_, r)| r.clone()).collect()
}

fn feature_sets(recipe: &Recipe) -> (HashSet<String>, HashSet<String>) {
    let lower = |items: &[String]| -> HashSet<String> {
        items.iter().map(|s| s.trim().to_lowercase()).collect()
    };
    (lower(&recipe.tags), lower(&recipe.ingredients))
}

/// |A ∩ B| / |A ∪ B|, or 0.0 when both sets are empty
fn jaccard_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        0.0
    } else {
        count_to_f64(a.intersection(b).count()) / count_to_f64(union)
    }
}
