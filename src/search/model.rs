use crate::Recipe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Recipe field a search query matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchedField {
    Title,
    Ingredients,
    Tags,
}

impl MatchedField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchedField::Title => "title",
            MatchedField::Ingredients => "ingredients",
            MatchedField::Tags => "tags",
        }
    }
}

/// A search result with its relevance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub recipe: Recipe,
    pub relevance_score: f64,
    pub matched_in: BTreeSet<MatchedField>,
}

impl SearchResult {
    pub(crate) fn new(recipe: Recipe) -> Self {
        Self {
            recipe,
            relevance_score: 0.0,
            matched_in: BTreeSet::new(),
        }
    }

    pub(crate) fn add_match(&mut self, field: MatchedField, points: f64) {
        self.relevance_score += points;
        self.matched_in.insert(field);
    }
}

/// Which recipe fields a query is matched against besides the title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    pub include_ingredients: bool,
    pub include_tags: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            include_ingredients: true,
            include_tags: true,
        }
    }
}
