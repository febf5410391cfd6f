use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::{DayName, MealType, Slot};

/// Otorduak fills the lunch and dinner slots of a week from a tagged meal catalog.
#[derive(Parser, Debug)]
#[command(name = "otorduak")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the meal catalog JSON file.
    #[arg(short, long, global = true, default_value = "meals.json")]
    pub catalog: PathBuf,

    /// Path to the planner state JSON file.
    #[arg(short, long, global = true, default_value = "planner_state.json")]
    pub state: PathBuf,

    /// Optional JSON rule set replacing the built-in slot and frequency rules.
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Seed for reproducible plans.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// First day shown in the week table.
    #[arg(long, global = true, value_enum, default_value = "monday")]
    pub week_start: DayName,

    /// Answer yes to every confirmation.
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// A (day, meal type) pair on the command line.
#[derive(Args, Debug, Clone, Copy)]
pub struct SlotArgs {
    #[arg(value_enum)]
    pub day: DayName,

    #[arg(value_enum)]
    pub meal_type: MealType,
}

impl From<SlotArgs> for Slot {
    fn from(args: SlotArgs) -> Self {
        Slot::new(args.day, args.meal_type)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new week plan.
    Plan,

    /// Show the saved week plan.
    Show,

    /// Replace one slot with another random candidate.
    Shuffle(SlotArgs),

    /// Put a catalog meal into a slot.
    Set {
        #[command(flatten)]
        slot: SlotArgs,

        /// Meal name (fuzzy matched).
        name: String,
    },

    /// Put a free-text meal into a slot.
    Custom {
        #[command(flatten)]
        slot: SlotArgs,

        /// Text of the meal.
        text: String,
    },

    /// Empty a slot.
    Clear(SlotArgs),

    /// List the meals eligible for a slot.
    Candidates(SlotArgs),

    /// Browse the catalog.
    Meals {
        /// Only meals carrying this tag (repeatable, all must match).
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Case-insensitive name search.
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Show a meal's tags, recipe link and ingredients.
    Meal {
        /// Meal name (fuzzy matched).
        name: String,
    },

    /// Manage meals that must be placed this week.
    Frozen {
        #[command(subcommand)]
        action: ListAction,
    },

    /// Manage must-have meals placed after frozen ones.
    Pinned {
        #[command(subcommand)]
        action: ListAction,
    },

    /// Show the grocery list for the saved plan.
    Grocery {
        /// Also write the list to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print unchecked items only, one per line.
        #[arg(long)]
        plain: bool,

        /// Tick off an item (repeatable).
        #[arg(long)]
        check: Vec<String>,

        /// Un-tick an item (repeatable).
        #[arg(long)]
        uncheck: Vec<String>,

        /// Un-tick every item.
        #[arg(long)]
        clear_checked: bool,
    },

    /// Print a share code for the saved plan.
    Share,

    /// Load a plan from a share code.
    Import {
        /// The share code.
        code: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ListAction {
    /// Add a meal (fuzzy matched).
    Add { name: String },

    /// Remove a meal.
    Remove { name: String },

    /// Remove every meal.
    Clear,

    /// Show the list.
    List,
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan
    }
}
