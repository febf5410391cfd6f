use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::models::Meal;
use crate::planner::RuleSet;
use crate::state::{MealCatalog, PlannerState};

/// Load the meal catalog from a JSON array.
///
/// Deduplicates by name (last occurrence wins).
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Meal>> {
    let content = fs::read_to_string(path)?;
    let meals: Vec<Meal> = serde_json::from_str(&content)?;

    Ok(MealCatalog::new(meals).meals().to_vec())
}

/// Load a rule set from JSON.
pub fn load_rules<P: AsRef<Path>>(path: P) -> Result<RuleSet> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load the planner state. A missing file is a fresh state.
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<PlannerState> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no planner state yet");
        return Ok(PlannerState::default());
    }

    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save the planner state as pretty JSON.
pub fn save_state<P: AsRef<Path>>(path: P, state: &PlannerState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayName, MealType, PlannedMeal, Slot, WeekPlan};
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_catalog_deduplicates() {
        let json = r#"[
            {"name": "Lentils", "tags": ["legumes"], "ingredients": ["lentils", "carrot"]},
            {"name": "Cod", "tags": ["fish"], "url": "https://example.com/cod"},
            {"name": "Lentils", "tags": ["legumes", "weekday-lunch"]}
        ]"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let meals = load_catalog(file.path()).unwrap();
        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].name, "Lentils");
        // Last occurrence wins
        assert!(meals[0].has_tag("weekday-lunch"));
        assert!(meals[0].ingredients.is_empty());
        assert_eq!(meals[1].url.as_deref(), Some("https://example.com/cod"));
    }

    #[test]
    fn test_missing_state_is_default() {
        let dir = TempDir::new().unwrap();
        let state = load_state(dir.path().join("nope.json")).unwrap();
        assert_eq!(state, PlannerState::default());
    }

    #[test]
    fn test_state_keeps_custom_meals() {
        let mut plan = WeekPlan::empty();
        plan.set(
            Slot::new(DayName::Friday, MealType::Dinner),
            Some(PlannedMeal::custom("Takeaway")),
        );
        plan.set(
            Slot::new(DayName::Monday, MealType::Lunch),
            Some(Meal::new("Lentils", &["weekday-lunch"]).into()),
        );

        let mut state = PlannerState::default();
        state.replace_plan(plan.clone());
        state.frozen.push("Lasagna".to_string());

        let file = NamedTempFile::new().unwrap();
        save_state(file.path(), &state).unwrap();

        let reloaded = load_state(file.path()).unwrap();
        assert_eq!(reloaded.week_plan, Some(plan));
        assert_eq!(reloaded.frozen, vec!["Lasagna"]);
    }

    #[test]
    fn test_load_rules() {
        let json = r#"{"slot_rules": [], "frequency_rules": [{"tag": "pasta", "meal_type": "lunch", "count": 1}]}"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let rules = load_rules(file.path()).unwrap();
        assert!(rules.slot_rules.is_empty());
        assert_eq!(rules.frequency_rules[0].tag, "pasta");
    }
}
