use std::path::PathBuf;

use crate::config::{default_list_name, GroceryConfig};
use crate::error::GroceryError;
use crate::matcher::MatchStrictness;
use crate::store::{JsonFileStore, ListStore, MemoryStore, SnapshotStore};

/// Builder for configuring and opening a [`ListStore`]
#[derive(Default)]
pub struct ListStoreBuilder {
    persistence: Option<Box<dyn SnapshotStore>>,
    strictness: Option<MatchStrictness>,
    default_list_name: Option<String>,
}

impl ListStoreBuilder {
    /// Use a custom snapshot backend
    ///
    /// # Example
    /// ```
    /// use grocery_list::{ListStore, MemoryStore};
    ///
    /// let builder = ListStore::builder()
    ///     .persistence(MemoryStore::new());
    /// ```
    pub fn persistence(mut self, store: impl SnapshotStore + 'static) -> Self {
        self.persistence = Some(Box::new(store));
        self
    }

    /// Keep snapshots in memory only
    pub fn in_memory(self) -> Self {
        self.persistence(MemoryStore::new())
    }

    /// Keep snapshots as JSON files in `dir`
    ///
    /// # Example
    /// ```
    /// use grocery_list::ListStore;
    ///
    /// let builder = ListStore::builder()
    ///     .json_dir("/tmp/groceries");
    /// ```
    pub fn json_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.persistence(JsonFileStore::new(dir))
    }

    /// Set how tolerant name matching is
    ///
    /// # Example
    /// ```
    /// use grocery_list::{ListStore, MatchStrictness};
    ///
    /// let builder = ListStore::builder()
    ///     .in_memory()
    ///     .strictness(MatchStrictness::Permissive);
    /// ```
    pub fn strictness(mut self, strictness: MatchStrictness) -> Self {
        self.strictness = Some(strictness);
        self
    }

    /// Name for the list auto-created when the store is empty
    pub fn default_list_name(mut self, name: impl Into<String>) -> Self {
        self.default_list_name = Some(name.into());
        self
    }

    /// Apply a loaded configuration
    ///
    /// Settings already given to the builder win; the configured storage
    /// directory is used only when no backend was chosen.
    pub fn config(mut self, config: &GroceryConfig) -> Self {
        self.strictness.get_or_insert(config.matching);
        self.default_list_name
            .get_or_insert_with(|| config.default_list_name.clone());
        if self.persistence.is_none() {
            self = self.json_dir(config.storage_dir.clone());
        }
        self
    }

    /// Load saved lists and open the store
    ///
    /// # Errors
    /// Returns `GroceryError::BuilderError` if:
    /// - No persistence backend was specified
    /// - The default list name is blank
    ///
    /// # Example
    /// ```
    /// # use grocery_list::ListStore;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let store = ListStore::builder().in_memory().build()?;
    /// assert_eq!(store.lists().len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<ListStore, GroceryError> {
        let persistence = self.persistence.ok_or_else(|| {
            GroceryError::BuilderError(
                "No persistence backend specified. Use .in_memory() or .json_dir()".to_string(),
            )
        })?;

        let default_list_name = self.default_list_name.unwrap_or_else(default_list_name);
        if default_list_name.trim().is_empty() {
            return Err(GroceryError::BuilderError(
                "Default list name cannot be empty".to_string(),
            ));
        }

        Ok(ListStore::open(
            persistence,
            self.strictness.unwrap_or_default(),
            default_list_name,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_persistence() {
        let result = ListStore::builder().build();
        assert!(matches!(result, Err(GroceryError::BuilderError(_))));
    }

    #[test]
    fn test_build_rejects_blank_list_name() {
        let result = ListStore::builder().in_memory().default_list_name("  ").build();
        assert!(matches!(result, Err(GroceryError::BuilderError(_))));
    }

    #[test]
    fn test_config_does_not_override_explicit_settings() {
        let config = GroceryConfig {
            matching: MatchStrictness::Permissive,
            default_list_name: "From Config".to_string(),
            ..Default::default()
        };

        let store = ListStore::builder()
            .in_memory()
            .strictness(MatchStrictness::Strict)
            .config(&config)
            .build()
            .unwrap();

        assert_eq!(store.strictness(), MatchStrictness::Strict);
        assert_eq!(store.current_list().name, "From Config");
    }
}
