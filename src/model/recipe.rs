use serde::{Deserialize, Serialize};

/// Unique identifier of a recipe in the backing store.
pub type RecipeId = i64;

/// A recipe as delivered by a [`RecipeSource`](crate::RecipeSource).
///
/// The engine only ever reads recipes; every operation that augments a
/// recipe with computed data returns a new value instead.
///
/// # Examples
///
/// ```
/// # use pantry_match::Recipe;
/// let recipe: Recipe = serde_json::from_str(r#"{
///     "id": 7,
///     "title": "Arroz com Feijão",
///     "ingredients": ["Arroz", "Feijão", "Sal"],
///     "prepTimeMinutes": 40,
///     "difficulty": "easy",
///     "mealType": "lunch"
/// }"#)?;
///
/// assert_eq!(recipe.main_ingredient(), Some("Arroz"));
/// assert!(recipe.tags.is_empty());
/// assert!(recipe.calories.is_none());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    /// Ordered ingredient names; the first one is the main ingredient
    pub ingredients: Vec<String>,
    /// Tags in insertion order
    #[serde(default)]
    pub tags: Vec<String>,
    pub prep_time_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub meal_type: String,
    /// How many users have favourited the recipe, if the backend tracks it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,
}

impl Recipe {
    /// Returns the first ingredient of the recipe, if any.
    pub fn main_ingredient(&self) -> Option<&str> {
        self.ingredients.first().map(String::as_str)
    }

    /// Case-insensitive check for a tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

#[cfg(test)]
pub(crate) fn test_recipe(id: RecipeId, title: &str, ingredients: &[&str]) -> Recipe {
    Recipe {
        id,
        title: title.to_string(),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        tags: Vec::new(),
        prep_time_minutes: 30,
        calories: None,
        difficulty: "easy".to_string(),
        meal_type: "lunch".to_string(),
        popularity: None,
    }
}
