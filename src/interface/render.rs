use std::collections::BTreeSet;

use crate::grocery::GroceryList;
use crate::models::{DayName, Meal, MealType, PlacementReport, PlannedMeal, Slot, WeekPlan};

/// Tag → emoji shown next to a meal name. First matching tag wins.
const TAG_EMOJI: [(&str, &str); 6] = [
    ("fish", "🐟"),
    ("legumes", "🫘"),
    ("salad", "🥗"),
    ("tv-food", "📺"),
    ("special", "⭐"),
    ("pasta", "🍝"),
];

/// Emoji for a meal's tags, empty if none applies.
pub fn tag_emoji(meal: &PlannedMeal) -> &'static str {
    match meal {
        PlannedMeal::Catalog(meal) => TAG_EMOJI
            .iter()
            .find(|(tag, _)| meal.has_tag(tag))
            .map(|(_, emoji)| *emoji)
            .unwrap_or(""),
        PlannedMeal::Custom { .. } => "✏️",
    }
}

fn cell(meal: Option<&PlannedMeal>) -> String {
    match meal {
        Some(meal) => {
            let emoji = tag_emoji(meal);
            if emoji.is_empty() {
                meal.name().to_string()
            } else {
                format!("{} {}", emoji, meal.name())
            }
        }
        None => "-".to_string(),
    }
}

/// Display a week plan as a table, starting the week at `week_start`.
pub fn display_week_plan(plan: &WeekPlan, week_start: DayName) {
    let lunches: Vec<String> = DayName::ALL
        .iter()
        .map(|&d| cell(plan.get(Slot::new(d, MealType::Lunch))))
        .collect();

    // Find max lunch cell length for alignment
    let width = lunches
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(10)
        .max("Lunch".len());

    println!();
    println!("=== Week Plan ===");
    println!();
    println!("{:<4} | {:<width$} | Dinner", "", "Lunch", width = width);

    for day in DayName::ordered_from(week_start) {
        let lunch = &lunches[day.index()];
        let dinner = cell(plan.get(Slot::new(day, MealType::Dinner)));
        let pad = width.saturating_sub(lunch.chars().count());
        println!("{:<4} | {}{} | {}", day.label(), lunch, " ".repeat(pad), dinner);
    }

    println!();
    println!("Filled slots: {}/14", plan.filled_count());
    println!();
}

/// Display what the planner could not do.
pub fn display_report(report: &PlacementReport) {
    if !report.placed_frozen.is_empty() {
        let placed: Vec<&str> = report.placed_frozen.iter().map(String::as_str).collect();
        println!("Frozen meals placed: {}", placed.join(", "));
    }

    if !report.unplaced_frozen.is_empty() {
        println!(
            "Frozen meals with no matching slot: {}",
            report.unplaced_frozen.join(", ")
        );
    }

    if !report.unplaced_pinned.is_empty() {
        println!(
            "Pinned meals with no matching slot: {}",
            report.unplaced_pinned.join(", ")
        );
    }

    if !report.reused_slots.is_empty() {
        let slots: Vec<String> = report.reused_slots.iter().map(Slot::to_string).collect();
        println!(
            "Not enough distinct meals, repeated a meal for: {}",
            slots.join(", ")
        );
    }
}

/// Display the candidates of a slot, marking its current occupant.
pub fn display_candidates(slot: Slot, candidates: &[&Meal], current: Option<&str>) {
    if candidates.is_empty() {
        println!("No candidates for {}.", slot);
        return;
    }

    println!();
    println!("=== Candidates for {} ({}) ===", slot, candidates.len());
    println!();

    for meal in candidates {
        let marker = if Some(meal.name.as_str()) == current {
            "*"
        } else {
            " "
        };
        println!(" {} {}", marker, meal.name);
    }

    println!();
}

/// Display a list of meals with their tags.
pub fn display_meal_list(meals: &[&Meal], title: &str) {
    if meals.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} meals) ===", title, meals.len());
    println!();

    let max_name_len = meals.iter().map(|m| m.name.chars().count()).max().unwrap_or(10);

    for meal in meals {
        let tags: Vec<&str> = meal.tags.iter().map(String::as_str).collect();
        let pad = max_name_len.saturating_sub(meal.name.chars().count());
        println!("  {}{}  [{}]", meal.name, " ".repeat(pad), tags.join(", "));
    }

    println!();
}

/// Display one meal: tags, recipe link and ingredients.
pub fn display_meal_detail(meal: &Meal) {
    println!();
    println!("=== {} ===", meal.name);

    let tags: Vec<&str> = meal.tags.iter().map(String::as_str).collect();
    println!("Tags: {}", if tags.is_empty() { "(none)".to_string() } else { tags.join(", ") });

    if let Some(url) = &meal.url {
        println!("Recipe: {}", url);
    }

    println!();
    println!("Ingredients ({}):", meal.ingredients.len());
    if meal.ingredients.is_empty() {
        println!("  (no ingredients listed)");
    }
    for ingredient in &meal.ingredients {
        match &ingredient.quantity {
            Some(quantity) => println!("  - {} ({})", ingredient.name, quantity),
            None => println!("  - {}", ingredient.name),
        }
    }
    println!();
}

/// Display a forced-meal list (frozen or pinned).
pub fn display_forced_list(label: &str, names: &[String]) {
    if names.is_empty() {
        println!("No {} meals.", label);
        return;
    }

    println!("{} meals ({}):", capitalize(label), names.len());
    for name in names {
        println!("  - {}", name);
    }
}

/// Display the grocery list grouped by department.
pub fn display_grocery_list(list: &GroceryList, checked: &BTreeSet<String>) {
    if list.is_empty() && list.not_included.is_empty() {
        println!("No meals in the plan yet.");
        return;
    }

    let checked_count = list.items().filter(|i| checked.contains(&i.key)).count();

    println!();
    println!("=== Grocery List ({}/{}) ===", checked_count, list.item_count());

    for (department, items) in &list.groups {
        println!();
        println!("{}", department.label());
        for item in items {
            let mark = if checked.contains(&item.key) { "x" } else { " " };
            let quantity = item.quantity_text();
            let quantity = if quantity.is_empty() {
                String::new()
            } else {
                format!(" {}", quantity)
            };
            println!(
                "  [{}] {}{}  ({})",
                mark,
                item.display_name(),
                quantity,
                item.meals.join(", ")
            );
        }
    }

    if !list.not_included.is_empty() {
        println!();
        println!("Not included (no ingredients): {}", list.not_included.join(", "));
    }
    println!();
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
