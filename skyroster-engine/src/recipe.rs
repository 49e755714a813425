//! Recipe selection for auto-assigned chefs. The selector is injected so the
//! production engine can stay random while tests assert deterministic
//! outcomes.

use rand::seq::SliceRandom;

pub trait RecipeSelector: Send + Sync {
    /// Pick one recipe from a chef's repertoire, or `None` when it is empty.
    fn pick(&self, recipes: &[String]) -> Option<String>;
}

/// Uniform random choice.
pub struct RandomRecipeSelector;

impl RecipeSelector for RandomRecipeSelector {
    fn pick(&self, recipes: &[String]) -> Option<String> {
        recipes.choose(&mut rand::thread_rng()).cloned()
    }
}

/// Always picks the first recipe. Deterministic stand-in for tests and
/// offline tooling.
pub struct FirstRecipeSelector;

impl RecipeSelector for FirstRecipeSelector {
    fn pick(&self, recipes: &[String]) -> Option<String> {
        recipes.first().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_pick_stays_in_repertoire() {
        let recipes = vec!["Italian".to_string(), "Turkish".to_string()];
        let selector = RandomRecipeSelector;
        for _ in 0..20 {
            let picked = selector.pick(&recipes).unwrap();
            assert!(recipes.contains(&picked));
        }
        assert_eq!(selector.pick(&[]), None);
    }

    #[test]
    fn first_pick_is_deterministic() {
        let recipes = vec!["Italian".to_string(), "Turkish".to_string()];
        assert_eq!(FirstRecipeSelector.pick(&recipes).as_deref(), Some("Italian"));
    }
}
