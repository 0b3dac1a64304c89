use crate::Recipe;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

mod model;

pub use model::{MatchedField, SearchOptions, SearchResult};

const TITLE_EXACT_SCORE: f64 = 100.0;
const TITLE_PREFIX_SCORE: f64 = 75.0;
const TITLE_CONTAINS_SCORE: f64 = 50.0;
const INGREDIENT_SCORE: f64 = 25.0;
const TAG_SCORE: f64 = 15.0;

/// Search recipes and order them by relevance to `query`.
///
/// Points are summed over every matching field; recipes that match nothing
/// are left out. Equal scores keep input order. A blank query matches nothing.
pub fn search_with_relevance(
    recipes: &[Recipe],
    query: &str,
    options: &SearchOptions,
) -> Vec<SearchResult> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut results: Vec<SearchResult> = recipes
        .iter()
        .map(|recipe| score_recipe(recipe, &query, options))
        .filter(|result| !result.matched_in.is_empty())
        .collect();

    sort_results(&mut results);
    results
}

/// Search recipes without scoring.
///
/// Matches the same fields as [`search_with_relevance`], then orders exact
/// title matches first, title prefix matches second, and everything else
/// alphabetically by title within each group. Accents are ignored when
/// ordering, so "Água" sorts with the a's.
pub fn search(recipes: &[Recipe], query: &str, options: &SearchOptions) -> Vec<Recipe> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<(u8, String, String, &Recipe)> = recipes
        .iter()
        .filter(|recipe| {
            let result = score_recipe(recipe, &query, options);
            !result.matched_in.is_empty()
        })
        .map(|recipe| {
            let title = recipe.title.to_lowercase();
            let tier = if title == query {
                0
            } else if title.starts_with(&query) {
                1
            } else {
                2
            };
            (tier, collation_key(&title), title, recipe)
        })
        .collect();

    matches.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| a.1.cmp(&b.1))
            .then_with(|| a.2.cmp(&b.2))
    });
    matches.into_iter().map(|(_, _, _, r)| r.clone()).collect()
}

/// Lower-cased title with diacritics stripped (NFD minus combining marks)
fn collation_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Score a single recipe against an already lower-cased query
fn score_recipe(recipe: &Recipe, query: &str, options: &SearchOptions) -> SearchResult {
    let mut result = SearchResult::new(recipe.clone());

    let title_score = score_title_match(&recipe.title, query);
    if title_score > 0.0 {
        result.add_match(MatchedField::Title, title_score);
    }

    if options.include_ingredients && any_contains(&recipe.ingredients, query) {
        result.add_match(MatchedField::Ingredients, INGREDIENT_SCORE);
    }

    if options.include_tags && any_contains(&recipe.tags, query) {
        result.add_match(MatchedField::Tags, TAG_SCORE);
    }

    result
}

/// Calculate score for title matches
fn score_title_match(title: &str, query: &str) -> f64 {
    let title = title.to_lowercase();
    if title == query {
        TITLE_EXACT_SCORE
    } else if title.starts_with(query) {
        TITLE_PREFIX_SCORE
    } else if title.contains(query) {
        TITLE_CONTAINS_SCORE
    } else {
        0.0
    }
}

fn any_contains(values: &[String], query: &str) -> bool {
    values.iter().any(|v| v.to_lowercase().contains(query))
}

/// Sort search results by score in descending order, ties in input order
fn sort_results(results: &mut [SearchResult]) {
    results.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_recipe;
    use crate::RecipeId;

    fn tagged(id: RecipeId, title: &str, ingredients: &[&str], tags: &[&str]) -> Recipe {
        let mut recipe = test_recipe(id, title, ingredients);
        recipe.tags = tags.iter().map(|s| s.to_string()).collect();
        recipe
    }

    fn setup_test_recipes() -> Vec<Recipe> {
        vec![
            tagged(1, "Bolo de Chocolate", &["Farinha", "Chocolate", "Ovo"], &["doce"]),
            tagged(2, "Bolo", &["Farinha", "Ovo"], &["doce", "simples"]),
            tagged(3, "Mousse", &["Chocolate", "Creme de leite"], &["Sobremesa"]),
            tagged(4, "Torta de Bolo Velho", &["Bolo", "Leite"], &[]),
            tagged(5, "Arroz", &["Arroz", "Sal"], &["salgado"]),
        ]
    }

    fn ids(results: &[SearchResult]) -> Vec<RecipeId> {
        results.iter().map(|r| r.recipe.id).collect()
    }

    #[test]
    fn test_exact_title_match() {
        let results = search_with_relevance(
            &setup_test_recipes(),
            "bolo de CHOCOLATE",
            &SearchOptions::default(),
        );

        assert_eq!(results[0].recipe.id, 1);
        assert_eq!(results[0].relevance_score, 100.0);
        assert_eq!(
            results[0].matched_in.iter().copied().collect::<Vec<_>>(),
            vec![MatchedField::Title]
        );
    }

    #[test]
    fn test_scores_accumulate_across_fields() {
        let results =
            search_with_relevance(&setup_test_recipes(), "chocolate", &SearchOptions::default());

        // Title contains (50) + ingredient (25) beats ingredient only (25)
        assert_eq!(ids(&results), vec![1, 3]);
        assert_eq!(results[0].relevance_score, 75.0);
        assert_eq!(results[1].relevance_score, 25.0);
        assert!(results[0].matched_in.contains(&MatchedField::Ingredients));
    }

    #[test]
    fn test_title_tiers() {
        let results = search_with_relevance(
            &setup_test_recipes(),
            "bolo",
            &SearchOptions {
                include_ingredients: false,
                include_tags: false,
            },
        );

        assert_eq!(ids(&results), vec![2, 1, 4]);
        let scores: Vec<f64> = results.iter().map(|r| r.relevance_score).collect();
        assert_eq!(scores, vec![100.0, 75.0, 50.0]);
    }

    #[test]
    fn test_tags_only_when_enabled() {
        let recipes = setup_test_recipes();

        let results = search_with_relevance(&recipes, "sobremesa", &SearchOptions::default());
        assert_eq!(ids(&results), vec![3]);
        assert_eq!(results[0].relevance_score, 15.0);

        let options = SearchOptions {
            include_tags: false,
            ..Default::default()
        };
        assert!(search_with_relevance(&recipes, "sobremesa", &options).is_empty());
    }

    #[test]
    fn test_non_matching_recipes_excluded() {
        let results =
            search_with_relevance(&setup_test_recipes(), "lasanha", &SearchOptions::default());
        assert!(results.is_empty());

        let results =
            search_with_relevance(&setup_test_recipes(), "sal", &SearchOptions::default());
        for result in &results {
            assert!(result.relevance_score > 0.0);
            assert!(!result.matched_in.is_empty());
        }
        assert_eq!(ids(&results), vec![5]);
    }

    #[test]
    fn test_blank_query() {
        assert!(search_with_relevance(&setup_test_recipes(), "  ", &SearchOptions::default())
            .is_empty());
        assert!(search(&setup_test_recipes(), "", &SearchOptions::default()).is_empty());
    }

    #[test]
    fn test_empty_recipes() {
        assert!(search_with_relevance(&[], "bolo", &SearchOptions::default()).is_empty());
    }

    #[test]
    fn test_search_result_sorting() {
        let recipes = setup_test_recipes();
        let mut results = vec![
            SearchResult {
                relevance_score: 1.0,
                ..SearchResult::new(recipes[0].clone())
            },
            SearchResult {
                relevance_score: 2.0,
                ..SearchResult::new(recipes[1].clone())
            },
            SearchResult {
                relevance_score: 1.0,
                ..SearchResult::new(recipes[2].clone())
            },
        ];

        sort_results(&mut results);

        assert_eq!(ids(&results), vec![2, 1, 3]);
    }

    #[test]
    fn test_unscored_search_ordering() {
        let mut recipes = setup_test_recipes();
        recipes.push(tagged(6, "Bolo Amanteigado", &["Manteiga"], &[]));
        recipes.push(tagged(7, "Pão de Ló", &["Ovo"], &["bolo"]));

        let results = search(&recipes, "Bolo", &SearchOptions::default());
        let ids: Vec<RecipeId> = results.iter().map(|r| r.id).collect();

        // exact, then prefixes alphabetically, then the rest alphabetically
        assert_eq!(ids, vec![2, 6, 1, 7, 4]);
    }

    #[test]
    fn test_unscored_search_ignores_accents_when_ordering() {
        let recipes = vec![
            tagged(1, "Suco de Laranja", &["Laranja"], &[]),
            tagged(2, "Água de Laranja", &["Laranja"], &[]),
            tagged(3, "Écler de Laranja", &["Laranja"], &[]),
            tagged(4, "Bolo de Laranja", &["Laranja"], &[]),
        ];

        let titles: Vec<String> = search(&recipes, "laranja", &SearchOptions::default())
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "Água de Laranja",
                "Bolo de Laranja",
                "Écler de Laranja",
                "Suco de Laranja"
            ]
        );
    }

    #[test]
    fn test_collation_key() {
        assert_eq!(collation_key("Óleo"), "oleo");
        assert_eq!(collation_key("Pão de Ló"), "pao de lo");
        assert_eq!(collation_key("Açaí"), "acai");
    }

    #[test]
    fn test_serialized_shape() {
        let results =
            search_with_relevance(&setup_test_recipes(), "mousse", &SearchOptions::default());
        let json = serde_json::to_value(&results[0]).unwrap();

        assert_eq!(json["relevanceScore"], 100.0);
        assert_eq!(json["matchedIn"][0], "title");
        assert_eq!(json["recipe"]["title"], "Mousse");
    }
}
