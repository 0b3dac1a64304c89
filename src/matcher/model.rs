use serde::{Deserialize, Serialize};

/// How well a recipe's ingredient list is covered by the available ingredients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Share of satisfied ingredients, 0 to 100
    pub match_percentage: u8,
    /// Satisfied ingredients in recipe order
    pub available_ingredients: Vec<String>,
    /// Unsatisfied ingredients in recipe order
    pub missing_ingredients: Vec<String>,
}

impl MatchResult {
    pub(crate) fn new() -> Self {
        Self {
            match_percentage: 0,
            available_ingredients: Vec::new(),
            missing_ingredients: Vec::new(),
        }
    }

    pub fn missing_count(&self) -> usize {
        self.missing_ingredients.len()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_ingredients.is_empty() && !self.available_ingredients.is_empty()
    }
}
