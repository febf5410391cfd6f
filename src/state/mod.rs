mod catalog;
mod persistence;
mod planner_state;

pub use catalog::{FUZZY_MATCH_THRESHOLD, MealCatalog};
pub use persistence::{load_catalog, load_rules, load_state, save_state};
pub use planner_state::PlannerState;
