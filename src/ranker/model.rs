use crate::{MatchResult, Recipe, DEFAULT_CAN_MAKE_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Options for [`rank_by_match`](super::rank_by_match)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RankOptions {
    /// Drop recipes scoring below this percentage
    pub min_match_percent: Option<u8>,
    /// Sort descending by match percentage (stable)
    pub sort_by_match: bool,
    /// Drop recipes that cannot be made at `can_make_threshold`
    pub only_makeable: bool,
    pub can_make_threshold: u8,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            min_match_percent: None,
            sort_by_match: true,
            only_makeable: false,
            can_make_threshold: DEFAULT_CAN_MAKE_THRESHOLD,
        }
    }
}

/// A recipe together with its match against the available ingredients.
///
/// Serializes as the recipe's own fields followed by the match fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    #[serde(flatten)]
    pub matching: MatchResult,
}

impl RankedRecipe {
    pub fn match_percentage(&self) -> u8 {
        self.matching.match_percentage
    }

    pub fn missing_ingredients(&self) -> &[String] {
        &self.matching.missing_ingredients
    }
}
