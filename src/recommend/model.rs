use crate::Recipe;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The heuristic that produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    PantryBased,
    FavoritesBased,
    Popular,
    Quick,
    /// Reserved for seasonal suggestions; the blender never produces it
    Seasonal,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::PantryBased => "pantry-based",
            Strategy::FavoritesBased => "favorites-based",
            Strategy::Popular => "popular",
            Strategy::Quick => "quick",
            Strategy::Seasonal => "seasonal",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recipe suggested by one strategy, with its score and a human readable reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedRecipe {
    pub recipe: Recipe,
    pub score: f64,
    pub reason: String,
    pub strategy: Strategy,
}

/// Scored candidates from each strategy, in blending priority order.
///
/// A strategy whose input could not be fetched is simply left empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrategyResults {
    pub pantry_based: Vec<RecommendedRecipe>,
    pub favorites_based: Vec<RecommendedRecipe>,
    pub popular: Vec<RecommendedRecipe>,
    pub quick: Vec<RecommendedRecipe>,
}

impl StrategyResults {
    /// Total number of candidates before allocation and dedup
    pub fn len(&self) -> usize {
        self.pantry_based.len() + self.favorites_based.len() + self.popular.len() + self.quick.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Share of the requested limit, in percent, each strategy may contribute.
///
/// Each share is rounded up on its own, so the candidate pool can exceed the
/// limit before the final truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyAllocation {
    pub pantry_based: u32,
    pub favorites_based: u32,
    pub popular: u32,
    pub quick: u32,
}

impl Default for StrategyAllocation {
    fn default() -> Self {
        Self {
            pantry_based: 40,
            favorites_based: 30,
            popular: 20,
            quick: 10,
        }
    }
}

impl StrategyAllocation {
    pub fn percent(&self, strategy: Strategy) -> u32 {
        match strategy {
            Strategy::PantryBased => self.pantry_based,
            Strategy::FavoritesBased => self.favorites_based,
            Strategy::Popular => self.popular,
            Strategy::Quick => self.quick,
            Strategy::Seasonal => 0,
        }
    }

    /// `ceil(limit * percent / 100)` for the given strategy
    pub fn target(&self, strategy: Strategy, limit: usize) -> usize {
        (limit * self.percent(strategy) as usize).div_ceil(100)
    }
}
