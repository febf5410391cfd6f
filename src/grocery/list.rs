use std::collections::{BTreeMap, BTreeSet};

use crate::grocery::departments::{Department, classify};
use crate::models::{Quantity, WeekPlan};

/// One line of the shopping list.
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryItem {
    /// Normalized ingredient name, the aggregation key.
    pub key: String,
    pub department: Department,
    /// Summed quantities, one entry per distinct unit.
    pub quantities: Vec<Quantity>,
    /// Some usage listed the ingredient without a quantity.
    pub has_unquantified: bool,
    /// Meals using this ingredient, first-seen order.
    pub meals: Vec<String>,
}

impl GroceryItem {
    fn new(key: String) -> Self {
        let department = classify(&key);
        Self {
            key,
            department,
            quantities: Vec::new(),
            has_unquantified: false,
            meals: Vec::new(),
        }
    }

    fn add_quantity(&mut self, quantity: &Quantity) {
        let unit = quantity.unit_key();
        match self.quantities.iter_mut().find(|q| q.unit_key() == unit) {
            Some(existing) => existing.amount += quantity.amount,
            None => self.quantities.push(quantity.clone()),
        }
    }

    fn add_meal(&mut self, meal: &str) {
        if !self.meals.iter().any(|m| m == meal) {
            self.meals.push(meal.to_string());
        }
    }

    /// Key with its first letter capitalized.
    pub fn display_name(&self) -> String {
        let mut chars = self.key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// "200 g + 1 can", with "+ some" when another usage gave no amount.
    /// Empty when nothing was quantified.
    pub fn quantity_text(&self) -> String {
        let mut parts: Vec<String> = self.quantities.iter().map(|q| q.to_string()).collect();
        if self.has_unquantified && !parts.is_empty() {
            parts.push("some".to_string());
        }
        parts.join(" + ")
    }
}

/// Aggregated ingredients of a week plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroceryList {
    /// Items grouped by department in store order, alphabetical within a group.
    pub groups: Vec<(Department, Vec<GroceryItem>)>,
    /// Meals that contributed nothing (custom meals, meals without ingredients).
    pub not_included: Vec<String>,
}

impl GroceryList {
    pub fn items(&self) -> impl Iterator<Item = &GroceryItem> {
        self.groups.iter().flat_map(|(_, items)| items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.items().count()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&GroceryItem> {
        self.items().find(|item| item.key == key)
    }

    /// Display names of items not in `checked`, ready to paste elsewhere.
    pub fn unchecked_lines(&self, checked: &BTreeSet<String>) -> Vec<String> {
        self.items()
            .filter(|item| !checked.contains(&item.key))
            .map(GroceryItem::display_name)
            .collect()
    }
}

/// Trim, lowercase, and collapse inner whitespace.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Build the grocery list for a plan.
pub fn aggregate(plan: &WeekPlan) -> GroceryList {
    let mut items: BTreeMap<String, GroceryItem> = BTreeMap::new();
    let mut not_included: Vec<String> = Vec::new();

    for (_, meal) in plan.meals() {
        let ingredients = meal.ingredients();
        if ingredients.is_empty() {
            if !not_included.iter().any(|n| n == meal.name()) {
                not_included.push(meal.name().to_string());
            }
            continue;
        }

        for ingredient in ingredients {
            let key = normalize_name(&ingredient.name);
            if key.is_empty() {
                continue;
            }

            let item = items
                .entry(key.clone())
                .or_insert_with(|| GroceryItem::new(key));
            match &ingredient.quantity {
                Some(quantity) => item.add_quantity(quantity),
                None => item.has_unquantified = true,
            }
            item.add_meal(meal.name());
        }
    }

    let mut grouped: BTreeMap<Department, Vec<GroceryItem>> = BTreeMap::new();
    for item in items.into_values() {
        grouped.entry(item.department).or_default().push(item);
    }

    GroceryList {
        groups: grouped.into_iter().collect(),
        not_included,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Red   Onion "), "red onion");
        assert_eq!(normalize_name("GARLIC"), "garlic");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn test_display_name() {
        let item = GroceryItem::new("olive oil".to_string());
        assert_eq!(item.display_name(), "Olive oil");
    }

    #[test]
    fn test_add_quantity_sums_same_unit() {
        let mut item = GroceryItem::new("rice".to_string());
        item.add_quantity(&Quantity::new(200.0, Some("g")));
        item.add_quantity(&Quantity::new(100.0, Some("G ")));
        item.add_quantity(&Quantity::new(1.0, Some("cup")));

        assert_eq!(item.quantities.len(), 2);
        assert_eq!(item.quantities[0].amount, 300.0);
        assert_eq!(item.quantity_text(), "300 g + 1 cup");
    }

    #[test]
    fn test_quantity_text_marks_unquantified_usage() {
        let mut item = GroceryItem::new("garlic".to_string());
        item.add_quantity(&Quantity::new(2.0, Some("cloves")));
        item.has_unquantified = true;
        assert_eq!(item.quantity_text(), "2 cloves + some");

        let bare = GroceryItem {
            has_unquantified: true,
            ..GroceryItem::new("salt".to_string())
        };
        assert_eq!(bare.quantity_text(), "");
    }
}
