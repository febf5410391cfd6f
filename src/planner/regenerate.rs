use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::models::{DayName, Meal, MealType, Slot, WeekPlan};
use crate::planner::candidates::candidates;
use crate::planner::rules::RuleSet;

/// Pick a replacement for one slot of `plan`.
///
/// Excludes the slot's current meal (`current_name`) and every meal sitting
/// in any other slot. Unlike the fill phase of `generate`, there is no
/// relaxation: when nothing is left, returns `None`.
pub fn regenerate<'a, R: Rng + ?Sized>(
    catalog: &'a [Meal],
    rules: &RuleSet,
    day: DayName,
    meal_type: MealType,
    plan: &WeekPlan,
    current_name: Option<&str>,
    rng: &mut R,
) -> Option<&'a Meal> {
    let slot = Slot::new(day, meal_type);
    let taken = plan.names_outside(slot);

    let remaining: Vec<&Meal> = candidates(catalog, rules, day, meal_type)
        .into_iter()
        .filter(|meal| Some(meal.name.as_str()) != current_name)
        .filter(|meal| !taken.contains(meal.name.as_str()))
        .collect();

    if remaining.is_empty() {
        debug!(%slot, "no replacement available");
        return None;
    }

    remaining.choose(rng).copied()
}
