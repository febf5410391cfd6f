use crate::models::{DayName, Meal, MealType};
use crate::planner::rules::RuleSet;

/// Meals eligible for (day, meal type), in catalog order.
///
/// 1. A slot rule, when present, decides alone: meals carrying its tag.
/// 2. Unruled weekdays fall back to the generic `weekday-lunch` /
///    `weekday-dinner` bucket.
/// 3. Unruled weekend slots have no bucket and get nothing.
pub fn candidates<'a>(
    catalog: &'a [Meal],
    rules: &RuleSet,
    day: DayName,
    meal_type: MealType,
) -> Vec<&'a Meal> {
    let tag = match rules.rule_for(day, meal_type) {
        Some(rule) => rule.required_tag.as_str(),
        None if day.is_weekday() => meal_type.weekday_tag(),
        None => return Vec::new(),
    };

    catalog.iter().filter(|meal| meal.has_tag(tag)).collect()
}

/// Whether `name` is among the candidates for (day, meal type).
pub fn is_candidate(
    catalog: &[Meal],
    rules: &RuleSet,
    day: DayName,
    meal_type: MealType,
    name: &str,
) -> bool {
    candidates(catalog, rules, day, meal_type)
        .iter()
        .any(|meal| meal.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Meal> {
        vec![
            Meal::new("Lentil stew", &["legumes", "weekday-lunch"]),
            Meal::new("Pasta", &["weekday-lunch"]),
            Meal::new("Omelette", &["weekday-dinner"]),
            Meal::new("Grilled cod", &["fish"]),
            Meal::new("Paella", &["special"]),
            Meal::new("Pizza", &["tv-food", "weekday-dinner"]),
        ]
    }

    fn names(meals: &[&Meal]) -> Vec<String> {
        meals.iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn test_rule_decides_alone() {
        let catalog = catalog();
        let rules = RuleSet::default();

        let tuesday_lunch = candidates(&catalog, &rules, DayName::Tuesday, MealType::Lunch);
        assert_eq!(names(&tuesday_lunch), vec!["Lentil stew"]);

        let friday_dinner = candidates(&catalog, &rules, DayName::Friday, MealType::Dinner);
        assert_eq!(names(&friday_dinner), vec!["Pizza"]);
    }

    #[test]
    fn test_weekday_bucket() {
        let catalog = catalog();
        let rules = RuleSet::default();

        let monday_lunch = candidates(&catalog, &rules, DayName::Monday, MealType::Lunch);
        assert_eq!(names(&monday_lunch), vec!["Lentil stew", "Pasta"]);

        let monday_dinner = candidates(&catalog, &rules, DayName::Monday, MealType::Dinner);
        assert_eq!(names(&monday_dinner), vec!["Omelette", "Pizza"]);
    }

    #[test]
    fn test_unruled_weekend_is_empty() {
        let catalog = catalog();
        let rules = RuleSet::empty();

        assert!(candidates(&catalog, &rules, DayName::Saturday, MealType::Lunch).is_empty());
        assert!(candidates(&catalog, &rules, DayName::Sunday, MealType::Dinner).is_empty());
    }

    #[test]
    fn test_unknown_tag_yields_nothing() {
        let catalog = catalog();
        let rules = RuleSet::empty().with_slot_rule(DayName::Monday, MealType::Lunch, "sushi");

        assert!(candidates(&catalog, &rules, DayName::Monday, MealType::Lunch).is_empty());
    }

    #[test]
    fn test_is_candidate() {
        let catalog = catalog();
        let rules = RuleSet::default();

        assert!(is_candidate(&catalog, &rules, DayName::Thursday, MealType::Dinner, "Grilled cod"));
        assert!(!is_candidate(&catalog, &rules, DayName::Monday, MealType::Dinner, "Grilled cod"));
    }
}
