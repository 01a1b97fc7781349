//! Decides whether two entries describe the same purchasable item.

use serde::Deserialize;

use crate::model::Ingredient;

/// How tolerant name comparison is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrictness {
    /// Exact name, or a declared equivalence such as garlic / garlic cloves
    #[default]
    Strict,
    /// Also strips a trailing "s" and consults a small synonym table
    Permissive,
}

/// Names treated as the same item under permissive matching
const SYNONYMS: &[&[&str]] = &[
    &["tomato", "tomatoes"],
    &["onion", "onions"],
    &["garlic", "garlic clove", "garlic cloves", "clove garlic", "cloves garlic", "minced garlic"],
    &["bell pepper", "bell peppers", "pepper"],
    &["potato", "potatoes"],
    &["carrot", "carrots"],
];

/// True for "garlic" and "garlic clove(s)"
pub fn is_garlic(name: &str) -> bool {
    matches!(
        name.trim().to_lowercase().as_str(),
        "garlic" | "garlic clove" | "garlic cloves"
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    strictness: MatchStrictness,
}

impl Matcher {
    pub fn new(strictness: MatchStrictness) -> Self {
        Matcher { strictness }
    }

    pub fn strictness(&self) -> MatchStrictness {
        self.strictness
    }

    /// Category must agree before names are compared at all
    pub fn is_match(&self, a: &Ingredient, b: &Ingredient) -> bool {
        if a.category != b.category {
            return false;
        }
        self.names_match(&a.name, &b.name)
    }

    pub fn names_match(&self, a: &str, b: &str) -> bool {
        let a = a.trim().to_lowercase();
        let b = b.trim().to_lowercase();

        if a == b || (is_garlic(&a) && is_garlic(&b)) {
            return true;
        }

        match self.strictness {
            MatchStrictness::Strict => false,
            MatchStrictness::Permissive => {
                strip_plural(&a) == strip_plural(&b) || are_synonyms(&a, &b)
            }
        }
    }
}

/// Match under the default strict policy
pub fn is_match(a: &Ingredient, b: &Ingredient) -> bool {
    Matcher::default().is_match(a, b)
}

fn strip_plural(name: &str) -> &str {
    if name.len() > 1 {
        name.strip_suffix('s').unwrap_or(name)
    } else {
        name
    }
}

fn are_synonyms(a: &str, b: &str) -> bool {
    SYNONYMS
        .iter()
        .any(|group| group.contains(&a) && group.contains(&b))
}
