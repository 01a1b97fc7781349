use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::units::{self, UnitKind};

/// Store section used to gate ingredient matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Produce,
    Meat,
    Seafood,
    Dairy,
    Bakery,
    Pantry,
    Frozen,
    Beverages,
    #[default]
    Other,
}

/// A single entry on a grocery list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    /// 0 means "unmeasured"
    pub amount: f64,
    pub unit: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub is_checked: bool,
    #[serde(default)]
    pub is_removed: bool,
}

impl Ingredient {
    /// Create a fresh, unchecked entry with a new id
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        unit: impl Into<String>,
        category: Category,
    ) -> Self {
        Ingredient {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            unit: unit.into(),
            category,
            is_checked: false,
            is_removed: false,
        }
    }

    /// Lower-cased, trimmed name used for matching
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// Whether this entry carries no real quantity
    pub fn is_zero_like(&self) -> bool {
        units::is_zero_like(self.amount, &self.unit)
    }

    /// Human readable quantity, e.g. "1.5 cups" or "To Taste"
    pub fn display_quantity(&self) -> String {
        if self.is_zero_like() {
            let label = self.unit.trim();
            return if units::classify(label) == UnitKind::Zero && !label.is_empty() {
                label.to_string()
            } else {
                "To Taste".to_string()
            };
        }

        let amount = units::format_amount(self.amount);
        let unit = self.unit.trim();
        if unit.is_empty() {
            amount
        } else {
            format!("{} {}", amount, unit)
        }
    }
}

/// A named, ordered grocery list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryList {
    pub id: Uuid,
    pub name: String,
    /// Insertion order is display order
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl GroceryList {
    pub fn new(name: impl Into<String>) -> Self {
        GroceryList {
            id: Uuid::new_v4(),
            name: name.into(),
            ingredients: Vec::new(),
        }
    }

    /// Entries that are not soft-deleted, in display order
    pub fn visible(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter().filter(|i| !i.is_removed)
    }

    /// Soft-deleted entries, in their original positions' order
    pub fn removed(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredients.iter().filter(|i| i.is_removed)
    }

    pub fn get(&self, id: Uuid) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Ingredient> {
        self.ingredients.iter_mut().find(|i| i.id == id)
    }
}
