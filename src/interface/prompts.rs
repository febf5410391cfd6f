use dialoguer::{Confirm, Select};

use crate::error::Result;
use crate::models::Meal;
use crate::state::MealCatalog;

/// Maximum fuzzy matches offered in a selection prompt.
const MAX_SUGGESTIONS: usize = 5;

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Confirmation that `--yes` answers in advance.
pub fn confirm(prompt: &str, default: bool, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    prompt_yes_no(prompt, default)
}

/// Resolve a typed meal name against the catalog.
///
/// An exact (case-insensitive) match is taken as is. A single fuzzy match is
/// confirmed; several are offered in a selection list. Returns `None` when
/// nothing matches or the user declines.
pub fn select_meal<'a>(
    catalog: &'a MealCatalog,
    query: &str,
    assume_yes: bool,
) -> Result<Option<&'a Meal>> {
    let candidates = catalog.fuzzy_matches(query);

    if candidates.is_empty() {
        println!("No matching meal found for '{}'", query.trim());
        return Ok(None);
    }

    if candidates.len() == 1 {
        let meal = candidates[0].0;
        if candidates[0].1 >= 1.0 {
            return Ok(Some(meal));
        }
        let accepted = confirm(&format!("Did you mean '{}'?", meal.name), true, assume_yes)?;
        return Ok(accepted.then_some(meal));
    }

    if assume_yes {
        return Ok(Some(candidates[0].0));
    }

    // Multiple matches - let user select
    let options: Vec<&Meal> = candidates
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(|(meal, _)| *meal)
        .collect();

    let mut labels: Vec<String> = options.iter().map(|m| m.name.clone()).collect();
    labels.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Which did you mean?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(options.get(selection).copied())
}
