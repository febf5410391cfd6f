mod meal;
mod week;

pub use meal::{Ingredient, Meal, PlannedMeal, Quantity};
pub use week::{DayName, DayPlan, ForcedList, MealType, PlacementReport, Slot, WeekPlan};
