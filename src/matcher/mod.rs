mod model;

pub use model::MatchResult;

/// Default match percentage at which a recipe counts as makeable
pub const DEFAULT_CAN_MAKE_THRESHOLD: u8 = 80;

/// Whether `ingredient` is covered by any of the `available` names.
///
/// Matching is case-insensitive substring containment in either direction,
/// so "Leite" is satisfied by "Leite Condensado" and vice versa. Blank
/// available names are ignored.
pub fn is_satisfied<S: AsRef<str>>(ingredient: &str, available: &[S]) -> bool {
    let ingredient = ingredient.to_lowercase();
    available
        .iter()
        .map(|name| name.as_ref().trim().to_lowercase())
        .any(|name| contains_either_way(&ingredient, &name))
}

fn contains_either_way(ingredient: &str, available: &str) -> bool {
    !available.is_empty() && (available.contains(ingredient) || ingredient.contains(available))
}

/// Score a recipe's ingredients against the available ingredient names.
///
/// Ingredients are partitioned into satisfied and missing, keeping recipe
/// order. An empty ingredient list scores 0.
pub fn score<S: AsRef<str>, A: AsRef<str>>(ingredients: &[S], available: &[A]) -> MatchResult {
    // Lower-case the pantry once instead of per ingredient
    let available: Vec<String> = available
        .iter()
        .map(|name| name.as_ref().trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    let mut result = MatchResult::new();
    for ingredient in ingredients {
        let ingredient = ingredient.as_ref();
        let lowered = ingredient.to_lowercase();
        if available
            .iter()
            .any(|name| contains_either_way(&lowered, name))
        {
            result.available_ingredients.push(ingredient.to_string());
        } else {
            result.missing_ingredients.push(ingredient.to_string());
        }
    }

    result.match_percentage = percentage(result.available_ingredients.len(), ingredients.len());
    result
}

/// Whether the recipe reaches `threshold` percent coverage.
pub fn can_make<S: AsRef<str>, A: AsRef<str>>(
    ingredients: &[S],
    available: &[A],
    threshold: u8,
) -> bool {
    score(ingredients, available).match_percentage >= threshold
}

/// `round(100 * part / total)` with halves rounded up, in integer arithmetic.
fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * part + total) / (2 * total);
    // part <= total, so rounded <= 100
    rounded.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_name_ignores_case() {
        assert!(is_satisfied("Leite", &["leite"]));
        assert!(is_satisfied("LEITE", &["Leite"]));
    }

    #[test]
    fn test_containment_in_both_directions() {
        assert!(is_satisfied("Leite", &["Leite Condensado"]));
        assert!(is_satisfied("Limão Siciliano", &["limão"]));
        // Loose on purpose: no word boundaries
        assert!(is_satisfied("Sal", &["Salsão"]));
        assert!(!is_satisfied("Feijão", &["arroz", "sal"]));
    }

    #[test]
    fn test_empty_available() {
        let empty: [&str; 0] = [];
        assert!(!is_satisfied("Arroz", &empty));
    }

    #[test]
    fn test_blank_available_name_satisfies_nothing() {
        assert!(!is_satisfied("Arroz", &["", "   "]));
    }

    #[test]
    fn test_partial_pantry_match() {
        let result = score(&["Arroz", "Feijão", "Sal"], &["arroz", "sal", "pimenta"]);

        assert_eq!(result.match_percentage, 67);
        assert_eq!(result.available_ingredients, vec!["Arroz", "Sal"]);
        assert_eq!(result.missing_ingredients, vec!["Feijão"]);
    }

    #[test]
    fn test_partition_invariant() {
        let ingredients = ["Ovo", "Leite", "Farinha", "Açúcar", "Fermento"];
        let available = ["ovos", "leite condensado", "açúcar mascavo"];
        let result = score(&ingredients, &available);

        assert_eq!(
            result.available_ingredients.len() + result.missing_ingredients.len(),
            ingredients.len()
        );
        for ingredient in &result.available_ingredients {
            assert!(!result.missing_ingredients.contains(ingredient));
        }
        assert_eq!(result.available_ingredients, vec!["Ovo", "Leite", "Açúcar"]);
        assert_eq!(result.match_percentage, 60);
    }

    #[test]
    fn test_empty_ingredients_score_zero() {
        let ingredients: [&str; 0] = [];
        let result = score(&ingredients, &["arroz"]);

        assert_eq!(result.match_percentage, 0);
        assert!(result.available_ingredients.is_empty());
        assert!(result.missing_ingredients.is_empty());
        assert!(!result.is_complete());
    }

    #[test]
    fn test_empty_pantry() {
        let available: [&str; 0] = [];
        let ingredients = ["Arroz", "Feijão"];
        let result = score(&ingredients, &available);

        assert_eq!(result.match_percentage, 0);
        assert_eq!(result.missing_count(), 2);
        for threshold in 1..=100 {
            assert!(!can_make(&ingredients, &available, threshold));
        }
    }

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(percentage(1, 8), 13); // 12.5
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(3, 3), 100);
        assert_eq!(percentage(0, 3), 0);
    }

    #[test]
    fn test_can_make_matches_score_for_every_threshold() {
        let ingredients = ["Arroz", "Feijão", "Sal", "Alho"];
        let available = ["arroz", "sal", "alho"];
        let pct = score(&ingredients, &available).match_percentage;

        for threshold in 0..=100u8 {
            assert_eq!(
                can_make(&ingredients, &available, threshold),
                pct >= threshold
            );
        }
    }

    #[test]
    fn test_default_threshold() {
        let ingredients = ["Arroz", "Feijão", "Sal", "Alho", "Cebola"];
        assert!(can_make(
            &ingredients,
            &["arroz", "feijão", "sal", "alho"],
            DEFAULT_CAN_MAKE_THRESHOLD
        ));
        assert!(!can_make(
            &ingredients,
            &["arroz", "feijão", "sal"],
            DEFAULT_CAN_MAKE_THRESHOLD
        ));
    }

    #[test]
    fn test_complete_match() {
        let result = score(&["Ovo"], &["ovo"]);
        assert!(result.is_complete());
        assert_eq!(result.match_percentage, 100);
    }
}
