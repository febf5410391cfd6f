use std::collections::{BTreeSet, HashMap};

use strsim::jaro_winkler;

use crate::models::Meal;

/// Minimum Jaro-Winkler similarity for a fuzzy name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// The meal catalog, indexed by name.
pub struct MealCatalog {
    meals: Vec<Meal>,
    /// Meal position keyed by exact name.
    index: HashMap<String, usize>,
}

impl MealCatalog {
    /// Build a catalog. A repeated name replaces the earlier entry in place.
    pub fn new(meals: Vec<Meal>) -> Self {
        let mut deduped: Vec<Meal> = Vec::with_capacity(meals.len());
        let mut index = HashMap::new();
        for meal in meals {
            match index.get(&meal.name).copied() {
                Some(pos) => deduped[pos] = meal,
                None => {
                    index.insert(meal.name.clone(), deduped.len());
                    deduped.push(meal);
                }
            }
        }
        Self {
            meals: deduped,
            index,
        }
    }

    /// Exact (case-sensitive) lookup.
    pub fn get(&self, name: &str) -> Option<&Meal> {
        self.index.get(name).map(|&pos| &self.meals[pos])
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    /// Every tag used by at least one meal, sorted.
    pub fn all_tags(&self) -> BTreeSet<&str> {
        self.meals
            .iter()
            .flat_map(|m| m.tags.iter().map(String::as_str))
            .collect()
    }

    /// Meals carrying all of `tags` whose name contains `search`
    /// (case-insensitive), sorted by name.
    pub fn filter(&self, tags: &[String], search: &str) -> Vec<&Meal> {
        let query = search.trim().to_lowercase();
        let mut result: Vec<&Meal> = self
            .meals
            .iter()
            .filter(|m| tags.iter().all(|t| m.has_tag(t)))
            .filter(|m| query.is_empty() || m.name.to_lowercase().contains(&query))
            .collect();
        result.sort_by_key(|m| m.name.to_lowercase());
        result
    }

    /// Meals whose name resembles `query`, best first.
    ///
    /// A case-insensitive exact match short-circuits to that single meal.
    pub fn fuzzy_matches(&self, query: &str) -> Vec<(&Meal, f64)> {
        let query = query.trim().to_lowercase();
        if let Some(exact) = self.meals.iter().find(|m| m.name.to_lowercase() == query) {
            return vec![(exact, 1.0)];
        }

        let mut matches: Vec<(&Meal, f64)> = self
            .meals
            .iter()
            .map(|m| (m, jaro_winkler(&m.name.to_lowercase(), &query)))
            .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
            .collect();

        matches.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        matches
    }

    /// Resolve stored names to catalog meals.
    ///
    /// Returns the found meals (input order) and the names that are unknown.
    pub fn resolve(&self, names: &[String]) -> (Vec<Meal>, Vec<String>) {
        let mut found = Vec::new();
        let mut missing = Vec::new();
        for name in names {
            match self.get(name) {
                Some(meal) => found.push(meal.clone()),
                None => missing.push(name.clone()),
            }
        }
        (found, missing)
    }

    /// Count of meals in the catalog.
    pub fn len(&self) -> usize {
        self.meals.len()
    }

    /// Check if the catalog has no meals.
    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_meals() -> Vec<Meal> {
        vec![
            Meal::new("Lentil stew", &["legumes", "weekday-lunch"]),
            Meal::new("Chickpea salad", &["legumes", "salad"]),
            Meal::new("Grilled cod", &["fish"]),
            Meal::new("Pizza", &["tv-food"]),
        ]
    }

    #[test]
    fn test_duplicate_names_last_wins_in_place() {
        let mut meals = sample_meals();
        meals.push(Meal::new("Lentil stew", &["special"]));

        let catalog = MealCatalog::new(meals);
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.meals()[0].name, "Lentil stew");
        assert!(catalog.get("Lentil stew").unwrap().has_tag("special"));
    }

    #[test]
    fn test_get_is_case_sensitive() {
        let catalog = MealCatalog::new(sample_meals());
        assert!(catalog.get("Pizza").is_some());
        assert!(catalog.get("pizza").is_none());
    }

    #[test]
    fn test_filter_by_tags_and_search() {
        let catalog = MealCatalog::new(sample_meals());

        let legumes = catalog.filter(&["legumes".to_string()], "");
        let names: Vec<&str> = legumes.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Chickpea salad", "Lentil stew"]);

        let both = catalog.filter(&["legumes".to_string(), "salad".to_string()], "");
        assert_eq!(both.len(), 1);

        let searched = catalog.filter(&[], "COD");
        assert_eq!(searched[0].name, "Grilled cod");
    }

    #[test]
    fn test_fuzzy_matches() {
        let catalog = MealCatalog::new(sample_meals());

        let exact = catalog.fuzzy_matches("pizza");
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].0.name, "Pizza");

        let typo = catalog.fuzzy_matches("Lentil stw");
        assert_eq!(typo[0].0.name, "Lentil stew");

        assert!(catalog.fuzzy_matches("zzzzzz").is_empty());
    }

    #[test]
    fn test_resolve_reports_missing() {
        let catalog = MealCatalog::new(sample_meals());
        let (found, missing) =
            catalog.resolve(&["Pizza".to_string(), "Sushi".to_string()]);
        assert_eq!(found.len(), 1);
        assert_eq!(missing, vec!["Sushi".to_string()]);
    }

    #[test]
    fn test_all_tags() {
        let catalog = MealCatalog::new(sample_meals());
        let tags = catalog.all_tags();
        assert!(tags.contains("fish"));
        assert_eq!(tags.len(), 5);
    }
}
