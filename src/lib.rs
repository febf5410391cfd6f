pub mod cli;
pub mod config;
pub mod error;
pub mod grocery;
pub mod interface;
pub mod logging;
pub mod models;
pub mod planner;
pub mod share;
pub mod state;

pub use error::{PlanError, Result};
pub use models::{DayName, Meal, MealType, PlacementReport, PlannedMeal, Slot, WeekPlan};
pub use planner::{RuleSet, candidates, generate, regenerate};
