use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::models::{DayName, Meal, MealType, Slot};

/// Hard constraint: the slot only accepts meals carrying `required_tag`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRule {
    pub day: DayName,
    pub meal_type: MealType,
    pub required_tag: String,
}

/// Weekly quota: `count` distinct `tag` meals in weekday `meal_type` slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyRule {
    pub tag: String,
    pub meal_type: MealType,
    pub count: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Built-in tables
// ─────────────────────────────────────────────────────────────────────────────

const SLOT_RULE_TABLE: [(DayName, MealType, &str); 9] = [
    (DayName::Tuesday, MealType::Lunch, "legumes"),
    (DayName::Tuesday, MealType::Dinner, "fish"),
    (DayName::Wednesday, MealType::Dinner, "salad"),
    (DayName::Thursday, MealType::Dinner, "fish"),
    (DayName::Friday, MealType::Dinner, "tv-food"),
    (DayName::Saturday, MealType::Lunch, "special"),
    (DayName::Saturday, MealType::Dinner, "tv-food"),
    (DayName::Sunday, MealType::Lunch, "special"),
    (DayName::Sunday, MealType::Dinner, "tv-food"),
];

const FREQUENCY_RULE_TABLE: [(&str, MealType, usize); 1] = [("fish", MealType::Dinner, 2)];

/// Default rule set built from the tables above.
pub static DEFAULT_RULES: LazyLock<RuleSet> = LazyLock::new(|| RuleSet {
    slot_rules: SLOT_RULE_TABLE
        .iter()
        .map(|&(day, meal_type, tag)| SlotRule {
            day,
            meal_type,
            required_tag: tag.to_string(),
        })
        .collect(),
    frequency_rules: FREQUENCY_RULE_TABLE
        .iter()
        .map(|&(tag, meal_type, count)| FrequencyRule {
            tag: tag.to_string(),
            meal_type,
            count,
        })
        .collect(),
});

/// Slot rules and frequency rules, both plain ordered lists scanned linearly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub slot_rules: Vec<SlotRule>,

    #[serde(default)]
    pub frequency_rules: Vec<FrequencyRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        DEFAULT_RULES.clone()
    }
}

impl RuleSet {
    /// No slot rules and no quotas: every weekday slot takes its generic bucket.
    pub fn empty() -> Self {
        Self {
            slot_rules: Vec::new(),
            frequency_rules: Vec::new(),
        }
    }

    pub fn with_slot_rule(mut self, day: DayName, meal_type: MealType, tag: &str) -> Self {
        self.slot_rules.push(SlotRule {
            day,
            meal_type,
            required_tag: tag.to_string(),
        });
        self
    }

    pub fn with_frequency_rule(mut self, tag: &str, meal_type: MealType, count: usize) -> Self {
        self.frequency_rules.push(FrequencyRule {
            tag: tag.to_string(),
            meal_type,
            count,
        });
        self
    }

    /// First rule governing (day, meal type), if any.
    pub fn rule_for(&self, day: DayName, meal_type: MealType) -> Option<&SlotRule> {
        self.slot_rules
            .iter()
            .find(|r| r.day == day && r.meal_type == meal_type)
    }

    /// Whether `meal` satisfies the slot's rule. Unruled slots admit anything.
    pub fn admits(&self, slot: Slot, meal: &Meal) -> bool {
        self.rule_for(slot.day, slot.meal_type)
            .is_none_or(|rule| meal.has_tag(&rule.required_tag))
    }
}
