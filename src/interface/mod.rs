pub mod prompts;
pub mod render;

pub use prompts::{confirm, prompt_yes_no, select_meal};
pub use render::{
    display_candidates, display_forced_list, display_grocery_list, display_meal_detail,
    display_meal_list, display_report, display_week_plan, tag_emoji,
};
