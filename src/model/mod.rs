mod pantry;
mod recipe;

pub use pantry::{available_ingredients, expiring_within, PantryItem};
pub use recipe::{Recipe, RecipeId};

#[cfg(test)]
pub(crate) use recipe::test_recipe;
