//! Grocery list consolidation for recipe apps.
//!
//! Raw ingredient entries are cleaned up by [`preprocess`], matched against
//! an existing list by [`Matcher`], and merged with [`consolidate`] so that
//! the list never holds two lines for the same purchasable item.
//! [`ListStore`] owns the lists and writes a snapshot after every change.

pub mod builder;
pub mod config;
pub mod consolidate;
pub mod error;
pub mod matcher;
pub mod model;
pub mod preprocess;
pub mod store;
pub mod uniffi_bindings;
pub mod units;

pub use builder::ListStoreBuilder;
pub use config::{load_config, GroceryConfig};
pub use consolidate::{consolidate, fold_into, Fold};
pub use error::GroceryError;
pub use matcher::{is_match, MatchStrictness, Matcher};
pub use model::{Category, GroceryList, Ingredient};
pub use preprocess::preprocess;
pub use store::{JsonFileStore, ListStore, MemoryStore, SnapshotKey, SnapshotStore};
pub use units::{classify, UnitKind};

/// Consolidate a batch of entries into a fresh list without a store
///
/// Useful for previewing what a recipe adds before committing it.
pub fn consolidate_entries(entries: Vec<Ingredient>, strictness: MatchStrictness) -> Vec<Ingredient> {
    let matcher = Matcher::new(strictness);
    let mut list = Vec::new();
    for entry in preprocess(entries) {
        fold_into(&mut list, entry, &matcher);
    }
    list
}
