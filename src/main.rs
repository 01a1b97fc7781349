use log::debug;
use serde::Deserialize;
use std::env;
use std::fs;
use uuid::Uuid;

use grocery_list::{Category, GroceryConfig, Ingredient, ListStore};

const USAGE: &str = "Usage: grocery-list <command> [args]

Commands:
  add <file.json>      Fold a JSON array of {name, amount, unit, category} into the current list
  list                 Show the current list
  check <id>           Toggle the purchased flag
  remove <id>          Hide an entry (can be restored)
  restore <id>         Bring a removed entry back
  delete <id>          Delete an entry permanently
  clear                Empty the current list
  clear-checked        Delete purchased entries
  lists                Show all lists
  new-list <name>      Create a list and switch to it
  use <id>             Switch the current list
  rename <id> <name>   Rename a list
  drop-list <id>       Delete a list";

/// Entry shape produced by the recipe parser
#[derive(Debug, Deserialize)]
struct NewIngredient {
    name: String,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    category: Category,
}

fn arg<'a>(args: &'a [String], index: usize, what: &str) -> Result<&'a str, String> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing {}\n\n{}", what, USAGE))
}

fn id_arg(args: &[String], index: usize) -> Result<Uuid, Box<dyn std::error::Error>> {
    Ok(Uuid::parse_str(arg(args, index, "id")?)?)
}

fn print_list(store: &ListStore) {
    let list = store.current_list();
    println!("{} ({})", list.name, list.id);
    for ingredient in list.visible() {
        println!(
            "  [{}] {} - {} ({:?}) {}",
            if ingredient.is_checked { "x" } else { " " },
            ingredient.name,
            ingredient.display_quantity(),
            ingredient.category,
            ingredient.id
        );
    }
    let removed = list.removed().count();
    if removed > 0 {
        println!("  ({} removed)", removed);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = arg(&args, 1, "command")?;

    let config = GroceryConfig::load()?;
    debug!("{:#?}", config);
    let mut store = ListStore::builder().config(&config).build()?;

    match command {
        "add" => {
            let path = arg(&args, 2, "file")?;
            let entries: Vec<NewIngredient> = serde_json::from_str(&fs::read_to_string(path)?)?;
            let entries = entries
                .into_iter()
                .map(|e| Ingredient::new(e.name, e.amount, e.unit, e.category))
                .collect();
            store.add_ingredients(entries)?;
            print_list(&store);
        }
        "list" => print_list(&store),
        "check" => store.toggle_checked(id_arg(&args, 2)?)?,
        "remove" => store.remove(id_arg(&args, 2)?)?,
        "restore" => store.restore(id_arg(&args, 2)?)?,
        "delete" => store.delete_ingredient(id_arg(&args, 2)?)?,
        "clear" => store.clear_all()?,
        "clear-checked" => store.clear_checked()?,
        "lists" => {
            for list in store.lists() {
                let marker = if list.id == store.current_list_id() { "*" } else { " " };
                println!("{} {} ({} entries) {}", marker, list.name, list.visible().count(), list.id);
            }
        }
        "new-list" => {
            let id = store.create_list(arg(&args, 2, "name")?)?;
            println!("{}", id);
        }
        "use" => store.select_list(id_arg(&args, 2)?)?,
        "rename" => {
            let id = id_arg(&args, 2)?;
            store.rename_list(id, arg(&args, 3, "name")?)?;
        }
        "drop-list" => store.delete_list(id_arg(&args, 2)?)?,
        other => return Err(format!("Unknown command '{}'\n\n{}", other, USAGE).into()),
    }

    Ok(())
}
