use grocery_list::{Category, Fold, Ingredient, ListStore, MatchStrictness};

fn store() -> ListStore {
    ListStore::builder().in_memory().build().unwrap()
}

fn names(store: &ListStore) -> Vec<String> {
    store
        .current_list()
        .visible()
        .map(|i| i.name.clone())
        .collect()
}

#[test]
fn test_add_returns_fold_outcomes() {
    let mut store = store();
    let folds = store
        .add_ingredients(vec![
            Ingredient::new("lemon", 1.0, "pieces", Category::Produce),
            Ingredient::new("lemon", 2.0, "pieces", Category::Produce),
            Ingredient::new("ice water", 1.0, "cup", Category::Other),
        ])
        .unwrap();

    assert_eq!(folds.len(), 2);
    let Fold::Appended(id) = folds[0] else {
        panic!("first lemon should be appended");
    };
    assert_eq!(folds[1], Fold::Merged(id));
    assert_eq!(store.ingredient(id).unwrap().amount, 3.0);
}

#[test]
fn test_insertion_order_is_display_order() {
    let mut store = store();
    store
        .add_ingredients(vec![
            Ingredient::new("eggs", 6.0, "pieces", Category::Dairy),
            Ingredient::new("bread", 1.0, "pieces", Category::Bakery),
            Ingredient::new("apples", 4.0, "pieces", Category::Produce),
        ])
        .unwrap();

    assert_eq!(names(&store), vec!["eggs", "bread", "apples"]);
}

#[test]
fn test_soft_delete_and_restore_keep_position() {
    let mut store = store();
    store
        .add_ingredients(vec![
            Ingredient::new("eggs", 6.0, "pieces", Category::Dairy),
            Ingredient::new("bread", 1.0, "pieces", Category::Bakery),
            Ingredient::new("apples", 4.0, "pieces", Category::Produce),
        ])
        .unwrap();
    let bread = store.current_list().ingredients[1].id;

    store.remove(bread).unwrap();
    assert_eq!(names(&store), vec!["eggs", "apples"]);
    assert_eq!(store.current_list().ingredients.len(), 3);
    assert!(store.ingredient(bread).unwrap().is_removed);

    store.restore(bread).unwrap();
    assert_eq!(names(&store), vec!["eggs", "bread", "apples"]);
    assert!(!store.ingredient(bread).unwrap().is_removed);
}

#[test]
fn test_hard_delete() {
    let mut store = store();
    store
        .add_ingredients(vec![Ingredient::new("eggs", 6.0, "pieces", Category::Dairy)])
        .unwrap();
    let eggs = store.current_list().ingredients[0].id;

    store.delete_ingredient(eggs).unwrap();
    assert!(store.ingredient(eggs).is_none());
    assert!(store.current_list().ingredients.is_empty());
}

#[test]
fn test_toggle_checked_flips() {
    let mut store = store();
    store
        .add_ingredients(vec![Ingredient::new("eggs", 6.0, "pieces", Category::Dairy)])
        .unwrap();
    let eggs = store.current_list().ingredients[0].id;

    store.toggle_checked(eggs).unwrap();
    assert!(store.ingredient(eggs).unwrap().is_checked);
    store.toggle_checked(eggs).unwrap();
    assert!(!store.ingredient(eggs).unwrap().is_checked);
}

#[test]
fn test_qualitative_add_keeps_purchased_flag() {
    let mut store = store();
    store
        .add_ingredients(vec![Ingredient::new("salt", 0.0, "To Taste", Category::Pantry)])
        .unwrap();
    let salt = store.current_list().ingredients[0].id;
    store.toggle_checked(salt).unwrap();

    store
        .add_ingredients(vec![Ingredient::new("salt", 1.0, "", Category::Other)])
        .unwrap();

    let entry = store.ingredient(salt).unwrap();
    assert_eq!(store.current_list().ingredients.len(), 1);
    assert_eq!(entry.amount, 0.0);
    assert!(entry.is_checked);
}

#[test]
fn test_clear_all() {
    let mut store = store();
    store
        .add_ingredients(vec![
            Ingredient::new("eggs", 6.0, "pieces", Category::Dairy),
            Ingredient::new("bread", 1.0, "pieces", Category::Bakery),
        ])
        .unwrap();

    store.clear_all().unwrap();
    assert!(store.current_list().ingredients.is_empty());
}

#[test]
fn test_multiple_lists_are_independent() {
    let mut store = store();
    let weekly = store.current_list_id();
    store
        .add_ingredients(vec![Ingredient::new("eggs", 6.0, "pieces", Category::Dairy)])
        .unwrap();

    let party = store.create_list("Party").unwrap();
    assert_eq!(store.current_list_id(), party);
    assert!(store.current_list().ingredients.is_empty());

    store
        .add_ingredients_to(weekly, vec![Ingredient::new("eggs", 6.0, "pieces", Category::Dairy)])
        .unwrap();
    assert!(store.current_list().ingredients.is_empty());
    assert_eq!(store.list(weekly).unwrap().ingredients[0].amount, 12.0);

    store.rename_list(party, "Birthday").unwrap();
    assert_eq!(store.current_list().name, "Birthday");

    store.select_list(weekly).unwrap();
    assert_eq!(store.current_list().name, "Grocery List");
}

#[test]
fn test_strict_and_permissive_stores() {
    let entries = || {
        vec![
            Ingredient::new("tomato", 2.0, "pieces", Category::Produce),
            Ingredient::new("tomatoes", 3.0, "pieces", Category::Produce),
        ]
    };

    let mut strict = store();
    strict.add_ingredients(entries()).unwrap();
    assert_eq!(strict.current_list().ingredients.len(), 2);

    let mut permissive = ListStore::builder()
        .in_memory()
        .strictness(MatchStrictness::Permissive)
        .build()
        .unwrap();
    permissive.add_ingredients(entries()).unwrap();
    assert_eq!(permissive.current_list().ingredients.len(), 1);
    assert_eq!(permissive.current_list().ingredients[0].amount, 5.0);
}
