use otorduak_rs::models::{DayName, Meal, MealType, PlannedMeal, Slot, WeekPlan};
use otorduak_rs::planner::{RuleSet, candidates, generate, regenerate};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn lunch_catalog(count: usize) -> Vec<Meal> {
    (0..count)
        .map(|i| Meal::new(&format!("Lunch {i}"), &["weekday-lunch"]))
        .collect()
}

#[test]
fn test_replacement_is_fresh_candidate() {
    let catalog = lunch_catalog(8);
    let rules = RuleSet::empty();
    let mut rng = StdRng::seed_from_u64(21);
    let (plan, _) = generate(&catalog, &rules, &[], &[], &mut rng);

    let slot = Slot::new(DayName::Monday, MealType::Lunch);
    let current = plan.get(slot).map(|m| m.name().to_string());
    let taken = plan.names_outside(slot);

    for _ in 0..20 {
        let meal = regenerate(
            &catalog,
            &rules,
            slot.day,
            slot.meal_type,
            &plan,
            current.as_deref(),
            &mut rng,
        )
        .unwrap();

        assert_ne!(Some(meal.name.as_str()), current.as_deref());
        assert!(!taken.contains(meal.name.as_str()));
        assert!(
            candidates(&catalog, &rules, slot.day, slot.meal_type)
                .iter()
                .any(|c| c.name == meal.name)
        );
    }
}

#[test]
fn test_exhausted_candidates_give_none() {
    let catalog = lunch_catalog(5);
    let rules = RuleSet::empty();
    let mut rng = StdRng::seed_from_u64(2);
    let (plan, _) = generate(&catalog, &rules, &[], &[], &mut rng);
    assert_eq!(plan.filled_count(), 5);

    let slot = Slot::new(DayName::Wednesday, MealType::Lunch);
    let current = plan.get(slot).map(|m| m.name().to_string());
    let picked = regenerate(
        &catalog,
        &rules,
        slot.day,
        slot.meal_type,
        &plan,
        current.as_deref(),
        &mut rng,
    );
    assert!(picked.is_none());
}

#[test]
fn test_empty_slot_accepts_any_unused_candidate() {
    let catalog = lunch_catalog(6);
    let rules = RuleSet::empty();
    let mut plan = WeekPlan::empty();
    for (day, meal) in DayName::ALL.into_iter().filter(|d| d.is_weekday()).zip(&catalog) {
        plan.set(Slot::new(day, MealType::Lunch), Some(meal.clone().into()));
    }
    let slot = Slot::new(DayName::Friday, MealType::Lunch);
    plan.set(slot, None);

    let mut rng = StdRng::seed_from_u64(9);
    let picked = regenerate(&catalog, &rules, slot.day, slot.meal_type, &plan, None, &mut rng)
        .unwrap();
    assert!(["Lunch 4", "Lunch 5"].contains(&picked.name.as_str()));
}

#[test]
fn test_custom_meal_does_not_block_catalog_name() {
    let catalog = lunch_catalog(2);
    let rules = RuleSet::empty();
    let mut plan = WeekPlan::empty();
    plan.set(
        Slot::new(DayName::Monday, MealType::Lunch),
        Some(PlannedMeal::custom("Leftovers")),
    );
    plan.set(
        Slot::new(DayName::Tuesday, MealType::Lunch),
        Some(catalog[0].clone().into()),
    );

    let mut rng = StdRng::seed_from_u64(4);
    let picked = regenerate(
        &catalog,
        &rules,
        DayName::Monday,
        MealType::Lunch,
        &plan,
        Some("Leftovers"),
        &mut rng,
    )
    .unwrap();
    assert_eq!(picked.name, "Lunch 1");
}

#[test]
fn test_ruled_slot_only_offers_tagged_meals() {
    let catalog = vec![
        Meal::new("Cod", &["fish"]),
        Meal::new("Salmon", &["fish"]),
        Meal::new("Quiche", &["weekday-dinner"]),
    ];
    let rules = RuleSet::default();
    let mut plan = WeekPlan::empty();
    let slot = Slot::new(DayName::Tuesday, MealType::Dinner);
    plan.set(slot, Some(catalog[0].clone().into()));

    let mut rng = StdRng::seed_from_u64(12);
    let picked = regenerate(&catalog, &rules, slot.day, slot.meal_type, &plan, Some("Cod"), &mut rng)
        .unwrap();
    assert_eq!(picked.name, "Salmon");
}
