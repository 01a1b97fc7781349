//! The list store: sole owner of the in-memory grocery lists.
//!
//! Every mutating call applies its change first and then writes both
//! snapshots. A failed write is returned as an error but the in-memory
//! state is kept. Ids that do not exist are logged and ignored.

pub mod persistence;

use log::{error, info, warn};
use serde::de::DeserializeOwned;
use uuid::Uuid;

pub use persistence::{JsonFileStore, MemoryStore, SnapshotKey, SnapshotStore};

use crate::builder::ListStoreBuilder;
use crate::consolidate::{fold_into, Fold};
use crate::error::GroceryError;
use crate::matcher::{MatchStrictness, Matcher};
use crate::model::{GroceryList, Ingredient};
use crate::preprocess::preprocess;

pub struct ListStore {
    lists: Vec<GroceryList>,
    /// Always names an entry of `lists`
    current: Uuid,
    matcher: Matcher,
    default_list_name: String,
    persistence: Box<dyn SnapshotStore>,
}

fn load_snapshot<T: DeserializeOwned>(store: &dyn SnapshotStore, key: SnapshotKey) -> Option<T> {
    let bytes = match store.load(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(e) => {
            error!(
                "Failed to read '{}' from {} store: {}",
                key.as_str(),
                store.backend_name(),
                e
            );
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            error!("Failed to decode '{}' snapshot: {}", key.as_str(), e);
            None
        }
    }
}

impl ListStore {
    /// Creates a new builder for opening a list store
    pub fn builder() -> ListStoreBuilder {
        ListStoreBuilder::default()
    }

    /// Restore lists from `persistence`, creating the default list if none survive
    pub(crate) fn open(
        persistence: Box<dyn SnapshotStore>,
        strictness: MatchStrictness,
        default_list_name: String,
    ) -> Self {
        let mut lists: Vec<GroceryList> =
            load_snapshot(persistence.as_ref(), SnapshotKey::AllLists).unwrap_or_default();
        let current_snapshot: Option<GroceryList> =
            load_snapshot(persistence.as_ref(), SnapshotKey::CurrentList);

        let current = match current_snapshot {
            Some(list) => {
                let id = list.id;
                if !lists.iter().any(|l| l.id == id) {
                    warn!("Current list '{}' missing from all lists, re-adding it", list.name);
                    lists.push(list);
                }
                Some(id)
            }
            None => lists.first().map(|l| l.id),
        };

        let mut store = ListStore {
            lists,
            current: current.unwrap_or_else(Uuid::nil),
            matcher: Matcher::new(strictness),
            default_list_name,
            persistence,
        };

        if current.is_none() {
            let id = store.push_default_list();
            store.current = id;
            if let Err(e) = store.persist() {
                warn!("Default list was created but not saved: {}", e);
            }
        }

        info!(
            "Opened {} list(s) from {} store",
            store.lists.len(),
            store.persistence.backend_name()
        );
        store
    }

    fn push_default_list(&mut self) -> Uuid {
        let list = GroceryList::new(self.default_list_name.clone());
        let id = list.id;
        info!("Creating default list '{}'", list.name);
        self.lists.push(list);
        id
    }

    pub fn strictness(&self) -> MatchStrictness {
        self.matcher.strictness()
    }

    pub fn lists(&self) -> &[GroceryList] {
        &self.lists
    }

    pub fn current_list_id(&self) -> Uuid {
        self.current
    }

    pub fn current_list(&self) -> &GroceryList {
        &self.lists[self.current_index()]
    }

    pub fn list(&self, id: Uuid) -> Option<&GroceryList> {
        self.lists.iter().find(|l| l.id == id)
    }

    /// Look an ingredient up across all lists
    pub fn ingredient(&self, id: Uuid) -> Option<&Ingredient> {
        self.lists.iter().find_map(|l| l.get(id))
    }

    fn current_index(&self) -> usize {
        self.lists
            .iter()
            .position(|l| l.id == self.current)
            .unwrap_or(0)
    }

    fn list_mut(&mut self, id: Uuid) -> Result<&mut GroceryList, GroceryError> {
        self.lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(GroceryError::ListNotFound(id))
    }

    fn ingredient_mut(&mut self, id: Uuid) -> Result<&mut Ingredient, GroceryError> {
        self.lists
            .iter_mut()
            .find_map(|l| l.get_mut(id))
            .ok_or(GroceryError::IngredientNotFound(id))
    }

    /// Apply `f` to an ingredient and persist, or log and do nothing
    fn update_ingredient(
        &mut self,
        id: Uuid,
        f: impl FnOnce(&mut Ingredient),
    ) -> Result<(), GroceryError> {
        match self.ingredient_mut(id) {
            Ok(ingredient) => f(ingredient),
            Err(e) => {
                warn!("{}", e);
                return Ok(());
            }
        }
        self.persist()
    }

    /// Write both snapshots
    pub fn persist(&mut self) -> Result<(), GroceryError> {
        let result = self.write_snapshots();
        if let Err(e) = &result {
            error!("Failed to save grocery lists: {}", e);
        }
        result
    }

    fn write_snapshots(&mut self) -> Result<(), GroceryError> {
        let all = serde_json::to_vec(&self.lists)?;
        let current = serde_json::to_vec(self.current_list())?;
        self.persistence.save(SnapshotKey::AllLists, &all)?;
        self.persistence.save(SnapshotKey::CurrentList, &current)?;
        Ok(())
    }

    /// Preprocess and fold entries into the current list
    pub fn add_ingredients(&mut self, entries: Vec<Ingredient>) -> Result<Vec<Fold>, GroceryError> {
        let id = self.current;
        self.add_ingredients_to(id, entries)
    }

    /// Preprocess and fold entries into a specific list
    pub fn add_ingredients_to(
        &mut self,
        list_id: Uuid,
        entries: Vec<Ingredient>,
    ) -> Result<Vec<Fold>, GroceryError> {
        let matcher = self.matcher;
        let list = match self.list_mut(list_id) {
            Ok(list) => list,
            Err(e) => {
                warn!("{}", e);
                return Ok(Vec::new());
            }
        };

        let folds: Vec<Fold> = preprocess(entries)
            .into_iter()
            .map(|entry| fold_into(&mut list.ingredients, entry, &matcher))
            .collect();

        info!("Folded {} entries into '{}'", folds.len(), list.name);
        self.persist()?;
        Ok(folds)
    }

    pub fn toggle_checked(&mut self, id: Uuid) -> Result<(), GroceryError> {
        self.update_ingredient(id, |i| i.is_checked = !i.is_checked)
    }

    /// Soft delete: the entry keeps its position and can be restored
    pub fn remove(&mut self, id: Uuid) -> Result<(), GroceryError> {
        self.update_ingredient(id, |i| i.is_removed = true)
    }

    pub fn restore(&mut self, id: Uuid) -> Result<(), GroceryError> {
        self.update_ingredient(id, |i| i.is_removed = false)
    }

    /// Permanently drop an entry
    pub fn delete_ingredient(&mut self, id: Uuid) -> Result<(), GroceryError> {
        let deleted = self.lists.iter_mut().any(|list| {
            match list.ingredients.iter().position(|i| i.id == id) {
                Some(pos) => {
                    list.ingredients.remove(pos);
                    true
                }
                None => false,
            }
        });

        if !deleted {
            warn!("{}", GroceryError::IngredientNotFound(id));
            return Ok(());
        }
        self.persist()
    }

    /// Empty the current list
    pub fn clear_all(&mut self) -> Result<(), GroceryError> {
        let index = self.current_index();
        self.lists[index].ingredients.clear();
        info!("Cleared '{}'", self.lists[index].name);
        self.persist()
    }

    /// Drop purchased entries from the current list
    pub fn clear_checked(&mut self) -> Result<(), GroceryError> {
        let index = self.current_index();
        self.lists[index].ingredients.retain(|i| !i.is_checked);
        self.persist()
    }

    /// Create a list and make it current
    pub fn create_list(&mut self, name: impl Into<String>) -> Result<Uuid, GroceryError> {
        let list = GroceryList::new(name);
        let id = list.id;
        info!("Creating list '{}'", list.name);
        self.lists.push(list);
        self.current = id;
        self.persist()?;
        Ok(id)
    }

    pub fn select_list(&mut self, id: Uuid) -> Result<(), GroceryError> {
        if self.list(id).is_none() {
            warn!("{}", GroceryError::ListNotFound(id));
            return Ok(());
        }
        self.current = id;
        self.persist()
    }

    pub fn rename_list(&mut self, id: Uuid, name: impl Into<String>) -> Result<(), GroceryError> {
        match self.list_mut(id) {
            Ok(list) => list.name = name.into(),
            Err(e) => {
                warn!("{}", e);
                return Ok(());
            }
        }
        self.persist()
    }

    /// Delete a list; deleting the current one moves to the first remaining list
    pub fn delete_list(&mut self, id: Uuid) -> Result<(), GroceryError> {
        let Some(pos) = self.lists.iter().position(|l| l.id == id) else {
            warn!("{}", GroceryError::ListNotFound(id));
            return Ok(());
        };

        let list = self.lists.remove(pos);
        info!("Deleted list '{}'", list.name);

        if self.current == id {
            let next = self.lists.first().map(|l| l.id);
            self.current = match next {
                Some(next) => next,
                None => self.push_default_list(),
            };
        }
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn store() -> ListStore {
        ListStore::open(
            Box::new(MemoryStore::new()),
            MatchStrictness::Strict,
            "Groceries".to_string(),
        )
    }

    #[test]
    fn test_open_empty_creates_default_list() {
        let store = store();
        assert_eq!(store.lists().len(), 1);
        assert_eq!(store.current_list().name, "Groceries");
        assert!(store.current_list().ingredients.is_empty());
    }

    #[test]
    fn test_unknown_ids_are_no_ops() {
        let mut store = store();
        store
            .add_ingredients(vec![Ingredient::new("egg", 6.0, "pieces", Category::Dairy)])
            .unwrap();
        let before = store.current_list().clone();

        let missing = Uuid::new_v4();
        store.toggle_checked(missing).unwrap();
        store.remove(missing).unwrap();
        store.restore(missing).unwrap();
        store.delete_ingredient(missing).unwrap();
        store.rename_list(missing, "x").unwrap();
        store.select_list(missing).unwrap();
        store.delete_list(missing).unwrap();
        assert!(store.add_ingredients_to(missing, vec![]).unwrap().is_empty());

        assert_eq!(store.current_list(), &before);
    }

    #[test]
    fn test_delete_current_list_falls_back() {
        let mut store = store();
        let first = store.current_list_id();
        let second = store.create_list("Party").unwrap();
        assert_eq!(store.current_list_id(), second);

        store.delete_list(second).unwrap();
        assert_eq!(store.current_list_id(), first);

        store.delete_list(first).unwrap();
        assert_eq!(store.lists().len(), 1);
        assert_eq!(store.current_list().name, "Groceries");
        assert_ne!(store.current_list_id(), first);
    }

    #[test]
    fn test_clear_checked() {
        let mut store = store();
        let folds = store
            .add_ingredients(vec![
                Ingredient::new("milk", 1.0, "cup", Category::Dairy),
                Ingredient::new("bread", 1.0, "pieces", Category::Bakery),
            ])
            .unwrap();
        let Fold::Appended(milk) = folds[0] else {
            panic!("expected append");
        };

        store.toggle_checked(milk).unwrap();
        store.clear_checked().unwrap();

        let names: Vec<_> = store.current_list().visible().map(|i| i.name.clone()).collect();
        assert_eq!(names, vec!["bread"]);
    }
}
