use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::PlannedMeal;

/// Day of the week, in canonical Monday-first order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DayName {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayName {
    pub const ALL: [DayName; 7] = [
        DayName::Monday,
        DayName::Tuesday,
        DayName::Wednesday,
        DayName::Thursday,
        DayName::Friday,
        DayName::Saturday,
        DayName::Sunday,
    ];

    /// Monday through Friday.
    #[inline]
    pub fn is_weekday(self) -> bool {
        !matches!(self, DayName::Saturday | DayName::Sunday)
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayName::Monday => "monday",
            DayName::Tuesday => "tuesday",
            DayName::Wednesday => "wednesday",
            DayName::Thursday => "thursday",
            DayName::Friday => "friday",
            DayName::Saturday => "saturday",
            DayName::Sunday => "sunday",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayName::Monday => "Mon",
            DayName::Tuesday => "Tue",
            DayName::Wednesday => "Wed",
            DayName::Thursday => "Thu",
            DayName::Friday => "Fri",
            DayName::Saturday => "Sat",
            DayName::Sunday => "Sun",
        }
    }

    /// All seven days, rotated so the week starts at `start`.
    pub fn ordered_from(start: DayName) -> [DayName; 7] {
        let mut days = Self::ALL;
        days.rotate_left(start.index());
        days
    }
}

impl std::fmt::Display for DayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 2] = [MealType::Lunch, MealType::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }

    /// Generic weekday bucket tag for slots without a slot rule.
    pub fn weekday_tag(self) -> &'static str {
        match self {
            MealType::Lunch => "weekday-lunch",
            MealType::Dinner => "weekday-dinner",
        }
    }
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (day, meal type) cell of a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub day: DayName,
    pub meal_type: MealType,
}

impl Slot {
    pub fn new(day: DayName, meal_type: MealType) -> Self {
        Self { day, meal_type }
    }

    /// The 14 slots of a week, day by day, lunch before dinner.
    pub fn all() -> impl Iterator<Item = Slot> {
        DayName::ALL.into_iter().flat_map(|day| {
            MealType::ALL
                .into_iter()
                .map(move |meal_type| Slot::new(day, meal_type))
        })
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.day, self.meal_type)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(default)]
    pub lunch: Option<PlannedMeal>,

    #[serde(default)]
    pub dinner: Option<PlannedMeal>,
}

impl DayPlan {
    pub fn get(&self, meal_type: MealType) -> Option<&PlannedMeal> {
        match meal_type {
            MealType::Lunch => self.lunch.as_ref(),
            MealType::Dinner => self.dinner.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, meal_type: MealType) -> &mut Option<PlannedMeal> {
        match meal_type {
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
        }
    }
}

/// A full week: a lunch and a dinner slot for each of the seven days.
///
/// Serialized as a map keyed by lowercase day name. Days missing from the
/// input come back empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<DayName, DayPlan>", into = "BTreeMap<DayName, DayPlan>")]
pub struct WeekPlan {
    days: [DayPlan; 7],
}

impl From<BTreeMap<DayName, DayPlan>> for WeekPlan {
    fn from(mut map: BTreeMap<DayName, DayPlan>) -> Self {
        let mut plan = WeekPlan::empty();
        for day in DayName::ALL {
            if let Some(day_plan) = map.remove(&day) {
                plan.days[day.index()] = day_plan;
            }
        }
        plan
    }
}

impl From<WeekPlan> for BTreeMap<DayName, DayPlan> {
    fn from(plan: WeekPlan) -> Self {
        DayName::ALL.into_iter().zip(plan.days).collect()
    }
}

impl WeekPlan {
    /// A plan with all 14 slots empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn day(&self, day: DayName) -> &DayPlan {
        &self.days[day.index()]
    }

    pub fn get(&self, slot: Slot) -> Option<&PlannedMeal> {
        self.day(slot.day).get(slot.meal_type)
    }

    pub fn is_empty_slot(&self, slot: Slot) -> bool {
        self.get(slot).is_none()
    }

    /// Put `meal` into `slot` (or clear it with `None`), returning the old occupant.
    pub fn set(&mut self, slot: Slot, meal: Option<PlannedMeal>) -> Option<PlannedMeal> {
        std::mem::replace(self.days[slot.day.index()].slot_mut(slot.meal_type), meal)
    }

    /// Every slot in canonical order with its occupant.
    pub fn slots(&self) -> impl Iterator<Item = (Slot, Option<&PlannedMeal>)> {
        Slot::all().map(move |slot| (slot, self.get(slot)))
    }

    /// Occupied slots only.
    pub fn meals(&self) -> impl Iterator<Item = (Slot, &PlannedMeal)> {
        self.slots()
            .filter_map(|(slot, meal)| meal.map(|m| (slot, m)))
    }

    pub fn empty_slots(&self) -> Vec<Slot> {
        self.slots()
            .filter(|(_, meal)| meal.is_none())
            .map(|(slot, _)| slot)
            .collect()
    }

    pub fn filled_count(&self) -> usize {
        self.meals().count()
    }

    /// Names occupying every slot except `excluded`.
    pub fn names_outside(&self, excluded: Slot) -> HashSet<&str> {
        self.meals()
            .filter(|(slot, _)| *slot != excluded)
            .map(|(_, meal)| meal.name())
            .collect()
    }

    /// Names that occupy more than one slot, sorted.
    pub fn repeated_names(&self) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (_, meal) in self.meals() {
            *counts.entry(meal.name()).or_insert(0) += 1;
        }
        let repeated: BTreeSet<&str> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect();
        repeated.into_iter().map(str::to_string).collect()
    }
}

/// A list of meals that must go into the week: frozen meals are placed
/// first, pinned meals after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForcedList {
    Frozen,
    Pinned,
}

impl ForcedList {
    pub fn label(self) -> &'static str {
        match self {
            ForcedList::Frozen => "frozen",
            ForcedList::Pinned => "pinned",
        }
    }
}

/// What the placement engine could not do, plus where it had to repeat a meal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementReport {
    pub placed_frozen: BTreeSet<String>,
    pub unplaced_frozen: Vec<String>,
    pub unplaced_pinned: Vec<String>,
    /// Slots the fill phase could only fill by reusing a meal already in the week.
    pub reused_slots: Vec<Slot>,
}

impl PlacementReport {
    pub fn has_unplaced(&self) -> bool {
        !self.unplaced_frozen.is_empty() || !self.unplaced_pinned.is_empty()
    }
}
