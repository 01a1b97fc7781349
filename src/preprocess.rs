//! Normalization applied to raw entries before they are matched.

use log::debug;
use regex::Regex;
use std::sync::LazyLock;

use crate::model::{Category, Ingredient};

/// Unit label for qualitative seasoning entries
pub const TO_TASTE: &str = "To Taste";

const EXCLUDED_WATERS: &[&str] = &[
    "water",
    "tap water",
    "filtered water",
    "distilled water",
    "ice water",
    "cold water",
    "warm water",
    "hot water",
    "lukewarm water",
    "boiling water",
    "room temperature water",
];

/// Flavored waters that are real purchases
const ALLOWED_WATERS: &[&str] = &[
    "rose water",
    "orange blossom water",
    "floral water",
    "coconut water",
];

static GENERIC_WATER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(ice|cold|warm|hot|lukewarm)?\s*water$").unwrap());

/// Words allowed in front of "pepper" for it to be the seasoning, not the vegetable
const PEPPER_QUALIFIERS: &[&str] = &[
    "black", "white", "ground", "freshly", "fresh", "cracked", "coarse", "coarsely",
];

/// Whether an entry is plain water and should never reach the list
pub fn is_water(name: &str) -> bool {
    let name = name.trim().to_lowercase();

    if ALLOWED_WATERS.contains(&name.as_str()) {
        return false;
    }

    EXCLUDED_WATERS.contains(&name.as_str())
        || GENERIC_WATER.is_match(&name)
        || name.ends_with(" water")
}

/// Entry carries no real measurement: no/piece/to-taste unit and amount ≤ 1
pub fn lacks_measurement(ingredient: &Ingredient) -> bool {
    let unit = ingredient.unit.trim().to_lowercase();
    let unmeasured_unit = matches!(unit.as_str(), "" | "piece" | "pieces" | "to taste");
    unmeasured_unit && ingredient.amount <= 1.0
}

fn is_salt(name: &str) -> bool {
    name.split_whitespace().last() == Some("salt")
}

fn is_seasoning_pepper(name: &str) -> bool {
    let words: Vec<&str> = name.split_whitespace().collect();
    match words.split_last() {
        Some((&"pepper", qualifiers)) => qualifiers.iter().all(|w| PEPPER_QUALIFIERS.contains(w)),
        _ => false,
    }
}

fn seasoning(name: &str) -> Ingredient {
    Ingredient::new(name, 0.0, TO_TASTE, Category::Pantry)
}

/// Split an unmeasured "salt and pepper" entry into two to-taste entries
///
/// Returns `None` when the entry is not a combined, unmeasured seasoning.
pub fn split_salt_and_pepper(ingredient: &Ingredient) -> Option<[Ingredient; 2]> {
    let name = ingredient.normalized_name();
    if !(name.contains("salt") && name.contains("pepper")) || !lacks_measurement(ingredient) {
        return None;
    }

    let salt = if name.contains("kosher") { "kosher salt" } else { "salt" };
    let pepper = if name.contains("black pepper") { "black pepper" } else { "pepper" };
    debug!("Splitting '{}' into '{}' and '{}'", ingredient.name, salt, pepper);

    Some([seasoning(salt), seasoning(pepper)])
}

/// Rewrite an unmeasured salt or pepper entry as a to-taste pantry item
pub fn normalize_seasoning(mut ingredient: Ingredient) -> Ingredient {
    let name = ingredient.normalized_name();

    if (is_salt(&name) || is_seasoning_pepper(&name)) && lacks_measurement(&ingredient) {
        debug!("Treating '{}' as {}", ingredient.name, TO_TASTE);
        ingredient.amount = 0.0;
        ingredient.unit = TO_TASTE.to_string();
        ingredient.category = Category::Pantry;
    }
    ingredient
}

/// Filter water, split combined seasonings and normalize unmeasured ones
pub fn preprocess(entries: Vec<Ingredient>) -> Vec<Ingredient> {
    let mut out = Vec::with_capacity(entries.len());

    for entry in entries {
        if is_water(&entry.name) {
            debug!("Dropping water entry '{}'", entry.name);
            continue;
        }

        match split_salt_and_pepper(&entry) {
            Some(parts) => out.extend(parts),
            None => out.push(normalize_seasoning(entry)),
        }
    }

    out
}
