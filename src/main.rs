use clap::Parser;
use tracing::{debug, info};

use otorduak_rs::cli::{Cli, Command, ListAction};
use otorduak_rs::config::AppConfig;
use otorduak_rs::error::{PlanError, Result};
use otorduak_rs::grocery::{aggregate, normalize_name, write_csv};
use otorduak_rs::interface::{
    confirm, display_candidates, display_forced_list, display_grocery_list, display_meal_detail,
    display_meal_list, display_report, display_week_plan, select_meal,
};
use otorduak_rs::logging;
use otorduak_rs::models::{ForcedList, PlannedMeal, Slot, WeekPlan};
use otorduak_rs::planner::{candidates, generate, is_candidate, regenerate};
use otorduak_rs::share;
use otorduak_rs::state::{MealCatalog, PlannerState, load_catalog, load_state, save_state};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from(&cli);
    logging::init(config.verbose);
    debug!(?config, "starting");

    match cli.command.unwrap_or_default() {
        Command::Plan => cmd_plan(&config),
        Command::Show => cmd_show(&config),
        Command::Shuffle(slot) => cmd_shuffle(&config, slot.into()),
        Command::Set { slot, name } => cmd_set(&config, slot.into(), &name),
        Command::Custom { slot, text } => cmd_custom(&config, slot.into(), &text),
        Command::Clear(slot) => cmd_clear(&config, slot.into()),
        Command::Candidates(slot) => cmd_candidates(&config, slot.into()),
        Command::Meals { tags, search } => cmd_meals(&config, &tags, &search),
        Command::Meal { name } => cmd_meal(&config, &name),
        Command::Frozen { action } => cmd_forced(&config, ForcedList::Frozen, action),
        Command::Pinned { action } => cmd_forced(&config, ForcedList::Pinned, action),
        Command::Grocery {
            csv,
            plain,
            check,
            uncheck,
            clear_checked,
        } => cmd_grocery(&config, csv, plain, &check, &uncheck, clear_checked),
        Command::Share => cmd_share(&config),
        Command::Import { code } => cmd_import(&config, &code),
    }
}

/// Load the catalog, or explain where it was expected.
fn open_catalog(config: &AppConfig) -> Result<Option<MealCatalog>> {
    if !config.catalog_path.exists() {
        eprintln!("Meal catalog not found: {}", config.catalog_path.display());
        eprintln!("Pass --catalog <PATH> or create meals.json in the current directory.");
        return Ok(None);
    }

    let catalog = MealCatalog::new(load_catalog(&config.catalog_path)?);
    debug!(meals = catalog.len(), "catalog loaded");
    Ok(Some(catalog))
}

fn saved_plan(state: &PlannerState) -> Result<WeekPlan> {
    state.week_plan.clone().ok_or(PlanError::NoSavedPlan)
}

fn store_plan(config: &AppConfig, state: &mut PlannerState, plan: WeekPlan) -> Result<()> {
    state.week_plan = Some(plan);
    save_state(&config.state_path, state)
}

/// Generate a week plan from the catalog and the saved forced meals.
fn cmd_plan(config: &AppConfig) -> Result<()> {
    let Some(catalog) = open_catalog(config)? else {
        return Ok(());
    };
    if catalog.is_empty() {
        println!("The meal catalog is empty.");
        return Ok(());
    }

    let rules = config.rules()?;
    let mut state = load_state(&config.state_path)?;

    let (frozen, unknown_frozen) = catalog.resolve(&state.frozen);
    let (pinned, unknown_pinned) = catalog.resolve(&state.pinned);
    for name in unknown_frozen.iter().chain(&unknown_pinned) {
        println!("Skipping '{}': not in the catalog.", name);
    }

    println!("Loaded {} meals", catalog.len());

    let mut rng = config.rng();
    let (plan, report) = generate(catalog.meals(), &rules, &frozen, &pinned, &mut rng);
    info!(
        filled = plan.filled_count(),
        unplaced = report.unplaced_frozen.len() + report.unplaced_pinned.len(),
        "plan generated"
    );

    display_week_plan(&plan, config.week_start);
    display_report(&report);

    if confirm("Save this plan?", true, config.assume_yes)? {
        state.replace_plan(plan);
        save_state(&config.state_path, &state)?;
        println!("Plan saved.");
    }

    Ok(())
}

/// Show the saved plan.
fn cmd_show(config: &AppConfig) -> Result<()> {
    let state = load_state(&config.state_path)?;
    let plan = saved_plan(&state)?;
    display_week_plan(&plan, config.week_start);

    let repeated = plan.repeated_names();
    if !repeated.is_empty() {
        println!("Repeated this week: {}", repeated.join(", "));
    }
    Ok(())
}

/// Swap one slot for a random candidate not used elsewhere this week.
fn cmd_shuffle(config: &AppConfig, slot: Slot) -> Result<()> {
    let Some(catalog) = open_catalog(config)? else {
        return Ok(());
    };
    let rules = config.rules()?;
    let mut state = load_state(&config.state_path)?;
    let mut plan = saved_plan(&state)?;

    let current = plan.get(slot).map(|m| m.name().to_string());
    let mut rng = config.rng();
    let replacement = regenerate(
        catalog.meals(),
        &rules,
        slot.day,
        slot.meal_type,
        &plan,
        current.as_deref(),
        &mut rng,
    );

    let Some(meal) = replacement else {
        println!(
            "No other meal fits {} without repeating one already in the week.",
            slot
        );
        return Ok(());
    };

    println!(
        "{}: {} -> {}",
        slot,
        current.as_deref().unwrap_or("(empty)"),
        meal.name
    );
    plan.set(slot, Some(PlannedMeal::Catalog(meal.clone())));
    store_plan(config, &mut state, plan)
}

/// Put a chosen catalog meal into a slot.
fn cmd_set(config: &AppConfig, slot: Slot, name: &str) -> Result<()> {
    let Some(catalog) = open_catalog(config)? else {
        return Ok(());
    };
    let rules = config.rules()?;
    let mut state = load_state(&config.state_path)?;
    let mut plan = saved_plan(&state)?;

    let Some(meal) = select_meal(&catalog, name, config.assume_yes)? else {
        return Ok(());
    };

    if !is_candidate(catalog.meals(), &rules, slot.day, slot.meal_type, &meal.name) {
        println!("'{}' is not a usual choice for {}.", meal.name, slot);
        if !confirm("Use it anyway?", false, config.assume_yes)? {
            return Ok(());
        }
    }

    if plan.names_outside(slot).contains(meal.name.as_str()) {
        println!("Note: '{}' is already planned elsewhere this week.", meal.name);
    }

    plan.set(slot, Some(PlannedMeal::Catalog(meal.clone())));
    println!("{}: {}", slot, meal.name);
    store_plan(config, &mut state, plan)
}

/// Put free text into a slot.
fn cmd_custom(config: &AppConfig, slot: Slot, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(PlanError::InvalidInput("custom meal text is empty".to_string()));
    }

    let mut state = load_state(&config.state_path)?;
    let mut plan = saved_plan(&state)?;

    let meal = PlannedMeal::custom(text);
    println!("{}: {} (custom)", slot, meal.name());
    plan.set(slot, Some(meal));
    store_plan(config, &mut state, plan)
}

/// Empty one slot.
fn cmd_clear(config: &AppConfig, slot: Slot) -> Result<()> {
    let mut state = load_state(&config.state_path)?;
    let mut plan = saved_plan(&state)?;

    match plan.set(slot, None) {
        Some(old) => println!("Cleared {} ({}).", slot, old.name()),
        None => println!("{} was already empty.", slot),
    }
    store_plan(config, &mut state, plan)
}

/// List the eligible meals for a slot.
fn cmd_candidates(config: &AppConfig, slot: Slot) -> Result<()> {
    let Some(catalog) = open_catalog(config)? else {
        return Ok(());
    };
    let rules = config.rules()?;
    let state = load_state(&config.state_path)?;

    let current = state
        .week_plan
        .as_ref()
        .and_then(|plan| plan.get(slot))
        .map(|meal| meal.name().to_string());

    let eligible = candidates(catalog.meals(), &rules, slot.day, slot.meal_type);
    display_candidates(slot, &eligible, current.as_deref());
    Ok(())
}

/// Browse the catalog by tag and name.
fn cmd_meals(config: &AppConfig, tags: &[String], search: &str) -> Result<()> {
    let Some(catalog) = open_catalog(config)? else {
        return Ok(());
    };

    let meals = catalog.filter(tags, search);
    display_meal_list(&meals, "Meals");

    if tags.is_empty() && search.is_empty() {
        let all_tags: Vec<&str> = catalog.all_tags().into_iter().collect();
        println!("Tags: {}", all_tags.join(", "));
    }
    Ok(())
}

/// Show one meal in detail.
fn cmd_meal(config: &AppConfig, name: &str) -> Result<()> {
    let Some(catalog) = open_catalog(config)? else {
        return Ok(());
    };

    if let Some(meal) = select_meal(&catalog, name, config.assume_yes)? {
        display_meal_detail(meal);
    }
    Ok(())
}

/// Edit the frozen or pinned list.
fn cmd_forced(config: &AppConfig, which: ForcedList, action: ListAction) -> Result<()> {
    let mut state = load_state(&config.state_path)?;

    match action {
        ListAction::Add { name } => {
            let Some(catalog) = open_catalog(config)? else {
                return Ok(());
            };
            let Some(meal) = select_meal(&catalog, &name, config.assume_yes)? else {
                return Ok(());
            };
            if state.add_forced(which, &meal.name) {
                println!("Added '{}' to {} meals.", meal.name, which.label());
            } else {
                println!("'{}' is already {}.", meal.name, which.label());
                return Ok(());
            }
        }
        ListAction::Remove { name } => {
            if !state.remove_forced(which, name.trim()) {
                return Err(PlanError::MealNotFound(name));
            }
            println!("Removed '{}' from {} meals.", name.trim(), which.label());
        }
        ListAction::Clear => {
            state.clear_forced(which);
            println!("Cleared {} meals.", which.label());
        }
        ListAction::List => {
            display_forced_list(which.label(), state.list(which));
            return Ok(());
        }
    }

    save_state(&config.state_path, &state)
}

/// Show, tick and export the grocery list.
fn cmd_grocery(
    config: &AppConfig,
    csv: Option<std::path::PathBuf>,
    plain: bool,
    check: &[String],
    uncheck: &[String],
    clear_checked: bool,
) -> Result<()> {
    let mut state = load_state(&config.state_path)?;
    let plan = saved_plan(&state)?;
    let list = aggregate(&plan);

    let mut changed = false;
    if clear_checked && !state.checked_groceries.is_empty() {
        state.checked_groceries.clear();
        changed = true;
    }
    for item in check {
        let key = normalize_name(item);
        if list.get(&key).is_none() {
            println!("'{}' is not on the list.", item);
            continue;
        }
        changed |= state.checked_groceries.insert(key);
    }
    for item in uncheck {
        changed |= state.checked_groceries.remove(&normalize_name(item));
    }
    if changed {
        save_state(&config.state_path, &state)?;
    }

    if plain {
        for line in list.unchecked_lines(&state.checked_groceries) {
            println!("{}", line);
        }
    } else {
        display_grocery_list(&list, &state.checked_groceries);
    }

    if let Some(path) = csv {
        write_csv(&list, &path)?;
        println!("Wrote grocery list to {}", path.display());
    }

    Ok(())
}

/// Print a share code for the saved plan.
fn cmd_share(config: &AppConfig) -> Result<()> {
    let state = load_state(&config.state_path)?;
    let plan = saved_plan(&state)?;
    println!("{}", share::encode(&plan)?);
    Ok(())
}

/// Replace the saved plan with a shared one.
fn cmd_import(config: &AppConfig, code: &str) -> Result<()> {
    let Some(catalog) = open_catalog(config)? else {
        return Ok(());
    };
    let mut state = load_state(&config.state_path)?;

    let plan = share::decode(code, &catalog)?;
    println!("Shared plan:");
    display_week_plan(&plan, config.week_start);

    if confirm("Use this plan?", true, config.assume_yes)? {
        state.replace_plan(plan);
        save_state(&config.state_path, &state)?;
        println!("Plan saved.");
    }
    Ok(())
}
