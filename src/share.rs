//! Compact, text-safe share codes for a week plan.
//!
//! A code carries meal names only. Decoding looks them up in the receiver's
//! catalog; names it does not know (custom meals included) come back as
//! empty slots.

use std::collections::BTreeMap;

use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::models::{DayName, MealType, PlannedMeal, Slot, WeekPlan};
use crate::state::MealCatalog;

#[derive(Debug, Serialize, Deserialize)]
struct CompactDay {
    lunch: Option<String>,
    dinner: Option<String>,
}

type CompactPlan = BTreeMap<DayName, CompactDay>;

/// Encode a plan as URL-safe base64 of its compact JSON form.
pub fn encode(plan: &WeekPlan) -> Result<String> {
    let compact: CompactPlan = DayName::ALL
        .into_iter()
        .map(|day| {
            let name = |meal_type| {
                plan.get(Slot::new(day, meal_type))
                    .map(|meal| meal.name().to_string())
            };
            (
                day,
                CompactDay {
                    lunch: name(MealType::Lunch),
                    dinner: name(MealType::Dinner),
                },
            )
        })
        .collect();

    let json = serde_json::to_vec(&compact)?;
    Ok(general_purpose::URL_SAFE_NO_PAD.encode(json))
}

/// Rebuild a plan from a share code against `catalog`.
///
/// Any decoding failure, including a day missing from the payload, is
/// reported as [`PlanError::CorruptedShareCode`].
pub fn decode(code: &str, catalog: &MealCatalog) -> Result<WeekPlan> {
    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(code.trim())
        .map_err(|e| PlanError::CorruptedShareCode(e.to_string()))?;
    let mut compact: CompactPlan = serde_json::from_slice(&bytes)
        .map_err(|e| PlanError::CorruptedShareCode(e.to_string()))?;

    let lookup = |name: Option<String>| -> Option<PlannedMeal> {
        name.and_then(|n| catalog.get(&n).cloned())
            .map(PlannedMeal::Catalog)
    };

    let mut plan = WeekPlan::empty();
    for day in DayName::ALL {
        let compact_day = compact
            .remove(&day)
            .ok_or_else(|| PlanError::CorruptedShareCode(format!("missing {}", day)))?;
        plan.set(Slot::new(day, MealType::Lunch), lookup(compact_day.lunch));
        plan.set(Slot::new(day, MealType::Dinner), lookup(compact_day.dinner));
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Meal;

    fn catalog() -> MealCatalog {
        MealCatalog::new(vec![
            Meal::new("Lentils", &["legumes"]),
            Meal::new("Cod", &["fish"]),
        ])
    }

    #[test]
    fn test_shared_plan_resolves_known_names() {
        let catalog = catalog();
        let mut plan = WeekPlan::empty();
        let tuesday_lunch = Slot::new(DayName::Tuesday, MealType::Lunch);
        let tuesday_dinner = Slot::new(DayName::Tuesday, MealType::Dinner);
        let friday_dinner = Slot::new(DayName::Friday, MealType::Dinner);
        plan.set(tuesday_lunch, Some(catalog.get("Lentils").cloned().unwrap().into()));
        plan.set(tuesday_dinner, Some(catalog.get("Cod").cloned().unwrap().into()));
        plan.set(friday_dinner, Some(PlannedMeal::custom("Takeaway")));

        let code = encode(&plan).unwrap();
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));

        let decoded = decode(&code, &catalog).unwrap();
        assert_eq!(decoded.get(tuesday_lunch).map(|m| m.name()), Some("Lentils"));
        assert_eq!(decoded.get(tuesday_dinner).map(|m| m.name()), Some("Cod"));
        // Custom meals are not in the catalog
        assert!(decoded.get(friday_dinner).is_none());
    }

    #[test]
    fn test_unknown_catalog_name_is_empty_slot() {
        let plan_catalog = MealCatalog::new(vec![Meal::new("Paella", &["special"])]);
        let mut plan = WeekPlan::empty();
        let slot = Slot::new(DayName::Sunday, MealType::Lunch);
        plan.set(slot, Some(plan_catalog.get("Paella").cloned().unwrap().into()));

        let decoded = decode(&encode(&plan).unwrap(), &catalog()).unwrap();
        assert!(decoded.get(slot).is_none());
    }

    #[test]
    fn test_garbage_is_corrupted() {
        let err = decode("%%% not base64 %%%", &catalog()).unwrap_err();
        assert!(matches!(err, PlanError::CorruptedShareCode(_)));

        let not_json = general_purpose::URL_SAFE_NO_PAD.encode(b"hello");
        let err = decode(&not_json, &catalog()).unwrap_err();
        assert!(matches!(err, PlanError::CorruptedShareCode(_)));
    }

    #[test]
    fn test_missing_day_is_corrupted() {
        let partial = general_purpose::URL_SAFE_NO_PAD
            .encode(br#"{"monday": {"lunch": null, "dinner": null}}"#);
        let err = decode(&partial, &catalog()).unwrap_err();
        assert!(matches!(err, PlanError::CorruptedShareCode(_)));
    }
}
