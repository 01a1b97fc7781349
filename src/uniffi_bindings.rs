//! UniFFI bindings for grocery-list
//!
//! This module provides FFI-compatible types and a thread-safe store handle
//! for use with iOS and Android. The store itself is single-writer; the
//! handle serializes calls through a mutex.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use crate::{Category, GroceryError, GroceryList, Ingredient, ListStore, MatchStrictness};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible category enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiCategory {
    Produce,
    Meat,
    Seafood,
    Dairy,
    Bakery,
    Pantry,
    Frozen,
    Beverages,
    Other,
}

impl From<Category> for FfiCategory {
    fn from(category: Category) -> Self {
        match category {
            Category::Produce => FfiCategory::Produce,
            Category::Meat => FfiCategory::Meat,
            Category::Seafood => FfiCategory::Seafood,
            Category::Dairy => FfiCategory::Dairy,
            Category::Bakery => FfiCategory::Bakery,
            Category::Pantry => FfiCategory::Pantry,
            Category::Frozen => FfiCategory::Frozen,
            Category::Beverages => FfiCategory::Beverages,
            Category::Other => FfiCategory::Other,
        }
    }
}

impl From<FfiCategory> for Category {
    fn from(category: FfiCategory) -> Self {
        match category {
            FfiCategory::Produce => Category::Produce,
            FfiCategory::Meat => Category::Meat,
            FfiCategory::Seafood => Category::Seafood,
            FfiCategory::Dairy => Category::Dairy,
            FfiCategory::Bakery => Category::Bakery,
            FfiCategory::Pantry => Category::Pantry,
            FfiCategory::Frozen => Category::Frozen,
            FfiCategory::Beverages => Category::Beverages,
            FfiCategory::Other => Category::Other,
        }
    }
}

/// FFI-compatible matching strictness
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiMatchStrictness {
    #[default]
    Strict,
    Permissive,
}

impl From<FfiMatchStrictness> for MatchStrictness {
    fn from(strictness: FfiMatchStrictness) -> Self {
        match strictness {
            FfiMatchStrictness::Strict => MatchStrictness::Strict,
            FfiMatchStrictness::Permissive => MatchStrictness::Permissive,
        }
    }
}

/// Entry as handed over by the recipe parser
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiNewIngredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub category: FfiCategory,
}

impl From<FfiNewIngredient> for Ingredient {
    fn from(ffi: FfiNewIngredient) -> Self {
        Ingredient::new(ffi.name, ffi.amount, ffi.unit, ffi.category.into())
    }
}

/// FFI-compatible list entry
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiIngredient {
    /// UUID string
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    /// Ready-to-show quantity, e.g. "1.5 cups" or "To Taste"
    pub display_quantity: String,
    pub category: FfiCategory,
    pub is_checked: bool,
    pub is_removed: bool,
}

impl From<&Ingredient> for FfiIngredient {
    fn from(ingredient: &Ingredient) -> Self {
        FfiIngredient {
            id: ingredient.id.to_string(),
            name: ingredient.name.clone(),
            amount: ingredient.amount,
            unit: ingredient.unit.clone(),
            display_quantity: ingredient.display_quantity(),
            category: ingredient.category.into(),
            is_checked: ingredient.is_checked,
            is_removed: ingredient.is_removed,
        }
    }
}

/// FFI-compatible grocery list
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiGroceryList {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<FfiIngredient>,
}

impl From<&GroceryList> for FfiGroceryList {
    fn from(list: &GroceryList) -> Self {
        FfiGroceryList {
            id: list.id.to_string(),
            name: list.name.clone(),
            ingredients: list.ingredients.iter().map(FfiIngredient::from).collect(),
        }
    }
}

/// Merged quantity returned by [`consolidate_quantity`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiQuantity {
    pub amount: f64,
    pub unit: String,
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiGroceryError {
    /// Reading or writing a snapshot failed
    StorageError { message: String },
    /// A snapshot could not be encoded or decoded
    SerializationError { message: String },
    /// Builder configuration error
    BuilderError { message: String },
    /// Configuration error
    ConfigError { message: String },
    /// A list or ingredient id is unknown
    NotFound { message: String },
    /// An id string is not a UUID
    InvalidId { message: String },
}

impl fmt::Display for FfiGroceryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiGroceryError::StorageError { message } => write!(f, "Storage error: {}", message),
            FfiGroceryError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
            FfiGroceryError::BuilderError { message } => write!(f, "Builder error: {}", message),
            FfiGroceryError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiGroceryError::NotFound { message } => write!(f, "Not found: {}", message),
            FfiGroceryError::InvalidId { message } => write!(f, "Invalid id: {}", message),
        }
    }
}

impl std::error::Error for FfiGroceryError {}

impl From<GroceryError> for FfiGroceryError {
    fn from(err: GroceryError) -> Self {
        match err {
            GroceryError::StorageError(e) => FfiGroceryError::StorageError {
                message: e.to_string(),
            },
            GroceryError::SerializationError(e) => FfiGroceryError::SerializationError {
                message: e.to_string(),
            },
            GroceryError::BuilderError(msg) => FfiGroceryError::BuilderError { message: msg },
            GroceryError::ConfigError(e) => FfiGroceryError::ConfigError {
                message: e.to_string(),
            },
            e @ (GroceryError::ListNotFound(_) | GroceryError::IngredientNotFound(_)) => {
                FfiGroceryError::NotFound {
                    message: e.to_string(),
                }
            }
        }
    }
}

fn parse_id(id: &str) -> Result<Uuid, FfiGroceryError> {
    Uuid::from_str(id).map_err(|e| FfiGroceryError::InvalidId {
        message: format!("'{}': {}", id, e),
    })
}

/// Store handle shared with the UI layer
#[cfg_attr(feature = "uniffi", derive(uniffi::Object))]
pub struct FfiListStore {
    inner: Mutex<ListStore>,
}

impl FfiListStore {
    fn lock(&self) -> Result<MutexGuard<'_, ListStore>, FfiGroceryError> {
        self.inner.lock().map_err(|_| FfiGroceryError::StorageError {
            message: "List store lock poisoned".to_string(),
        })
    }
}

#[cfg_attr(feature = "uniffi", uniffi::export)]
impl FfiListStore {
    /// Open a store backed by JSON files in `storage_dir`
    #[cfg_attr(feature = "uniffi", uniffi::constructor)]
    pub fn new(
        storage_dir: String,
        strictness: FfiMatchStrictness,
    ) -> Result<Arc<Self>, FfiGroceryError> {
        let store = ListStore::builder()
            .json_dir(storage_dir)
            .strictness(strictness.into())
            .build()?;
        Ok(Arc::new(FfiListStore {
            inner: Mutex::new(store),
        }))
    }

    /// Open a store that keeps nothing across sessions
    #[cfg_attr(feature = "uniffi", uniffi::constructor)]
    pub fn in_memory(strictness: FfiMatchStrictness) -> Result<Arc<Self>, FfiGroceryError> {
        let store = ListStore::builder()
            .in_memory()
            .strictness(strictness.into())
            .build()?;
        Ok(Arc::new(FfiListStore {
            inner: Mutex::new(store),
        }))
    }

    pub fn current_list(&self) -> Result<FfiGroceryList, FfiGroceryError> {
        Ok(self.lock()?.current_list().into())
    }

    pub fn lists(&self) -> Result<Vec<FfiGroceryList>, FfiGroceryError> {
        Ok(self.lock()?.lists().iter().map(FfiGroceryList::from).collect())
    }

    pub fn add_ingredients(&self, entries: Vec<FfiNewIngredient>) -> Result<(), FfiGroceryError> {
        let entries = entries.into_iter().map(Ingredient::from).collect();
        self.lock()?.add_ingredients(entries)?;
        Ok(())
    }

    pub fn toggle_checked(&self, id: String) -> Result<(), FfiGroceryError> {
        Ok(self.lock()?.toggle_checked(parse_id(&id)?)?)
    }

    pub fn remove(&self, id: String) -> Result<(), FfiGroceryError> {
        Ok(self.lock()?.remove(parse_id(&id)?)?)
    }

    pub fn restore(&self, id: String) -> Result<(), FfiGroceryError> {
        Ok(self.lock()?.restore(parse_id(&id)?)?)
    }

    pub fn delete_ingredient(&self, id: String) -> Result<(), FfiGroceryError> {
        Ok(self.lock()?.delete_ingredient(parse_id(&id)?)?)
    }

    pub fn clear_all(&self) -> Result<(), FfiGroceryError> {
        Ok(self.lock()?.clear_all()?)
    }

    pub fn clear_checked(&self) -> Result<(), FfiGroceryError> {
        Ok(self.lock()?.clear_checked()?)
    }

    /// Returns the new list's id
    pub fn create_list(&self, name: String) -> Result<String, FfiGroceryError> {
        Ok(self.lock()?.create_list(name)?.to_string())
    }

    pub fn select_list(&self, id: String) -> Result<(), FfiGroceryError> {
        Ok(self.lock()?.select_list(parse_id(&id)?)?)
    }

    pub fn rename_list(&self, id: String, name: String) -> Result<(), FfiGroceryError> {
        Ok(self.lock()?.rename_list(parse_id(&id)?, name)?)
    }

    pub fn delete_list(&self, id: String) -> Result<(), FfiGroceryError> {
        Ok(self.lock()?.delete_list(parse_id(&id)?)?)
    }
}

/// Merge two quantities of the same ingredient
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn consolidate_quantity(
    existing_amount: f64,
    existing_unit: String,
    new_amount: f64,
    new_unit: String,
    ingredient_name: String,
) -> FfiQuantity {
    let (amount, unit) = crate::consolidate(
        existing_amount,
        &existing_unit,
        new_amount,
        &new_unit,
        &ingredient_name,
    );
    FfiQuantity { amount, unit }
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
