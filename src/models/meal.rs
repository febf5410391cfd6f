use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Amount of an ingredient, with an optional free-form unit ("g", "cloves", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Quantity {
    pub fn new(amount: f64, unit: Option<&str>) -> Self {
        Self {
            amount,
            unit: unit.map(str::to_string),
        }
    }

    /// Unit key used when summing quantities (case-insensitive, trimmed).
    pub fn unit_key(&self) -> String {
        self.unit
            .as_deref()
            .map(|u| u.trim().to_lowercase())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.amount.fract() == 0.0 {
            write!(f, "{:.0}", self.amount)?;
        } else {
            write!(f, "{:.2}", self.amount)?;
        }
        match self.unit.as_deref() {
            Some(unit) if !unit.is_empty() => write!(f, " {}", unit),
            _ => Ok(()),
        }
    }
}

/// A single ingredient line of a meal.
///
/// Catalog files may list an ingredient as a bare string or as an object
/// with a quantity; both deserialize into this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "IngredientRepr")]
pub struct Ingredient {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IngredientRepr {
    Plain(String),
    Detailed {
        name: String,
        #[serde(default)]
        quantity: Option<Quantity>,
    },
}

impl From<IngredientRepr> for Ingredient {
    fn from(repr: IngredientRepr) -> Self {
        match repr {
            IngredientRepr::Plain(name) => Ingredient {
                name,
                quantity: None,
            },
            IngredientRepr::Detailed { name, quantity } => Ingredient { name, quantity },
        }
    }
}

impl Ingredient {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: None,
        }
    }

    pub fn with_quantity(name: &str, amount: f64, unit: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            quantity: Some(Quantity::new(amount, unit)),
        }
    }
}

/// A catalog meal.
///
/// The name is the identity key: two meals with the same name are the same
/// meal, regardless of tags or ingredients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub name: String,

    #[serde(default)]
    pub tags: BTreeSet<String>,

    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Meal {
    pub fn new(name: &str, tags: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ingredients: Vec::new(),
            url: None,
        }
    }

    pub fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Exact, case-sensitive tag check.
    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

impl PartialEq for Meal {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Meal {}

impl std::hash::Hash for Meal {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Whatever occupies a week slot.
///
/// `Custom` is typed in by the user and never comes out of the planner: it
/// has no tags and no ingredients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlannedMeal {
    Catalog(Meal),
    Custom { name: String },
}

impl PlannedMeal {
    pub fn custom(text: &str) -> Self {
        PlannedMeal::Custom {
            name: text.trim().to_string(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PlannedMeal::Catalog(meal) => &meal.name,
            PlannedMeal::Custom { name } => name,
        }
    }

    pub fn as_catalog(&self) -> Option<&Meal> {
        match self {
            PlannedMeal::Catalog(meal) => Some(meal),
            PlannedMeal::Custom { .. } => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, PlannedMeal::Custom { .. })
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        match self {
            PlannedMeal::Catalog(meal) => &meal.ingredients,
            PlannedMeal::Custom { .. } => &[],
        }
    }
}

impl From<Meal> for PlannedMeal {
    fn from(meal: Meal) -> Self {
        PlannedMeal::Catalog(meal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_match_is_case_sensitive() {
        let meal = Meal::new("Hake in green sauce", &["fish"]);
        assert!(meal.has_tag("fish"));
        assert!(!meal.has_tag("Fish"));
    }

    #[test]
    fn test_identity_is_name() {
        let a = Meal::new("Lentils", &["legumes"]);
        let b = Meal::new("Lentils", &["weekday-lunch"]);
        assert_eq!(a, b);
        assert_ne!(a, Meal::new("lentils", &["legumes"]));
    }

    #[test]
    fn test_ingredient_accepts_plain_and_detailed() {
        let json = r#"{
            "name": "Tortilla",
            "tags": ["weekday-dinner"],
            "ingredients": ["eggs", {"name": "potato", "quantity": {"amount": 3, "unit": "pcs"}}]
        }"#;

        let meal: Meal = serde_json::from_str(json).unwrap();
        assert_eq!(meal.ingredients.len(), 2);
        assert_eq!(meal.ingredients[0], Ingredient::new("eggs"));
        assert_eq!(
            meal.ingredients[1],
            Ingredient::with_quantity("potato", 3.0, Some("pcs"))
        );
        assert!(meal.url.is_none());
    }

    #[test]
    fn test_custom_meal_has_nothing_to_shop() {
        let custom = PlannedMeal::custom("  Leftovers ");
        assert!(custom.is_custom());
        assert_eq!(custom.name(), "Leftovers");
        assert!(custom.ingredients().is_empty());
        assert!(custom.as_catalog().is_none());
    }

    #[test]
    fn test_planned_meal_json_keeps_url() {
        let planned: PlannedMeal = Meal::new("Cod", &["fish"])
            .with_url("https://example.com/cod")
            .into();

        let json = serde_json::to_string(&planned).unwrap();
        assert!(json.contains(r#""kind":"catalog""#));

        let back: PlannedMeal = serde_json::from_str(&json).unwrap();
        let meal = back.as_catalog().unwrap();
        assert_eq!(meal.url.as_deref(), Some("https://example.com/cod"));
        assert!(meal.has_tag("fish"));
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(Quantity::new(2.0, Some("kg")).to_string(), "2 kg");
        assert_eq!(Quantity::new(0.25, None).to_string(), "0.25");
    }
}
