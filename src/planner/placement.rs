use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::models::{DayName, ForcedList, Meal, PlacementReport, PlannedMeal, Slot, WeekPlan};
use crate::planner::candidates::candidates;
use crate::planner::rules::RuleSet;

/// Which forced list a meal came from.
/// Working state of one `generate` call.
struct WeekBuilder<'a> {
    catalog: &'a [Meal],
    rules: &'a RuleSet,
    plan: WeekPlan,
    used: HashSet<String>,
    report: PlacementReport,
}

impl<'a> WeekBuilder<'a> {
    fn new(catalog: &'a [Meal], rules: &'a RuleSet) -> Self {
        Self {
            catalog,
            rules,
            plan: WeekPlan::empty(),
            used: HashSet::new(),
            report: PlacementReport::default(),
        }
    }

    fn fill(&mut self, slot: Slot, meal: &Meal) {
        self.plan.set(slot, Some(PlannedMeal::Catalog(meal.clone())));
        self.used.insert(meal.name.clone());
    }

    /// Empty slots whose candidates contain a meal named `name`, with that candidate.
    fn forced_targets(&self, name: &str) -> Vec<(Slot, &'a Meal)> {
        self.plan
            .empty_slots()
            .into_iter()
            .filter_map(|slot| {
                candidates(self.catalog, self.rules, slot.day, slot.meal_type)
                    .into_iter()
                    .find(|meal| meal.name == name)
                    .map(|meal| (slot, meal))
            })
            .collect()
    }

    /// Phases 1 and 2: place each forced meal in a random eligible empty slot.
    fn place_forced<R: Rng + ?Sized>(&mut self, meals: &[Meal], kind: ForcedList, rng: &mut R) {
        let mut order: Vec<&Meal> = meals.iter().collect();
        order.shuffle(rng);

        for forced in order {
            if self.used.contains(&forced.name) {
                debug!(meal = %forced.name, ?kind, "forced meal already on the plan");
                continue;
            }

            let targets = self.forced_targets(&forced.name);
            match targets.choose(rng) {
                Some(&(slot, meal)) => {
                    debug!(meal = %meal.name, %slot, ?kind, "placed forced meal");
                    self.fill(slot, meal);
                    if kind == ForcedList::Frozen {
                        self.report.placed_frozen.insert(meal.name.clone());
                    }
                }
                None => {
                    info!(meal = %forced.name, ?kind, "no empty slot accepts forced meal");
                    match kind {
                        ForcedList::Frozen => self.report.unplaced_frozen.push(forced.name.clone()),
                        ForcedList::Pinned => self.report.unplaced_pinned.push(forced.name.clone()),
                    }
                }
            }
        }
    }

    /// Phase 3: satisfy each frequency rule with distinct unused tagged meals.
    ///
    /// A slot governed by a slot rule only takes a quota meal that also
    /// carries the rule's tag.
    fn fill_quotas<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (catalog, rules) = (self.catalog, self.rules);

        for rule in &rules.frequency_rules {
            let mut tagged: Vec<&Meal> = catalog
                .iter()
                .filter(|meal| meal.has_tag(&rule.tag))
                .collect();
            tagged.shuffle(rng);

            let mut slots: Vec<Slot> = DayName::ALL
                .into_iter()
                .filter(|day| day.is_weekday())
                .map(|day| Slot::new(day, rule.meal_type))
                .filter(|slot| self.plan.is_empty_slot(*slot))
                .collect();
            slots.shuffle(rng);

            let mut placed = 0;
            for slot in slots {
                if placed >= rule.count {
                    break;
                }
                if !self.plan.is_empty_slot(slot) {
                    continue;
                }

                let next = tagged
                    .iter()
                    .copied()
                    .find(|meal| !self.used.contains(&meal.name) && rules.admits(slot, meal));

                if let Some(meal) = next {
                    debug!(meal = %meal.name, %slot, tag = %rule.tag, "placed quota meal");
                    self.fill(slot, meal);
                    placed += 1;
                }
            }

            if placed < rule.count {
                debug!(
                    tag = %rule.tag,
                    meal_type = %rule.meal_type,
                    placed,
                    wanted = rule.count,
                    "frequency quota not met"
                );
            }
        }
    }

    /// Phase 4: fill every remaining slot, preferring meals not yet used.
    ///
    /// When every candidate is already used, one of them is reused rather
    /// than leaving the slot empty.
    fn fill_remaining<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for slot in Slot::all() {
            if !self.plan.is_empty_slot(slot) {
                continue;
            }

            let all = candidates(self.catalog, self.rules, slot.day, slot.meal_type);
            let fresh: Vec<&Meal> = all
                .iter()
                .copied()
                .filter(|meal| !self.used.contains(&meal.name))
                .collect();

            if let Some(&meal) = fresh.choose(rng) {
                self.fill(slot, meal);
            } else if let Some(&meal) = all.choose(rng) {
                info!(meal = %meal.name, %slot, "reusing meal, no unused candidate left");
                self.report.reused_slots.push(slot);
                self.fill(slot, meal);
            } else {
                debug!(%slot, "no candidates, slot left empty");
            }
        }
    }
}

/// Build a week plan.
///
/// Runs four phases in order, never revisiting a slot once filled:
/// 1. frozen meals
/// 2. pinned meals
/// 3. frequency quotas
/// 4. generic fill
pub fn generate<R: Rng + ?Sized>(
    catalog: &[Meal],
    rules: &RuleSet,
    frozen: &[Meal],
    pinned: &[Meal],
    rng: &mut R,
) -> (WeekPlan, PlacementReport) {
    let mut builder = WeekBuilder::new(catalog, rules);

    builder.place_forced(frozen, ForcedList::Frozen, rng);
    builder.place_forced(pinned, ForcedList::Pinned, rng);
    builder.fill_quotas(rng);
    builder.fill_remaining(rng);

    debug!(
        filled = builder.plan.filled_count(),
        reused = builder.report.reused_slots.len(),
        "week plan generated"
    );

    (builder.plan, builder.report)
}
