//! Folding new entries into an existing list.
//!
//! [`consolidate`] is the pure quantity merge. [`fold_into`] finds the first
//! matching entry in a list and applies the merge in place, or appends.

use log::debug;
use uuid::Uuid;

use crate::matcher::{is_garlic, Matcher};
use crate::model::Ingredient;
use crate::units::{
    classify, format_amount, format_bound, grams_to_weight, is_zero_like, milliliters_to_volume,
    normalize_unit, parse_range, volume_to_milliliters, weight_to_grams, UnitKind, VolumeUnit,
};

/// Below this a summed range is a single point
const RANGE_EPSILON: f64 = 1e-6;

/// Interval view of a count or range quantity
#[derive(Debug)]
struct Span {
    min: f64,
    max: f64,
    base: Option<String>,
    /// Came from a garlic volume measurement rather than a count
    from_volume: bool,
}

/// 1 tsp ≈ 1 clove, 1 tbsp = 3 tsp
fn garlic_teaspoons_per(unit: VolumeUnit) -> f64 {
    match unit {
        VolumeUnit::Teaspoon => 1.0,
        VolumeUnit::Tablespoon => 3.0,
        other => other.milliliters() / VolumeUnit::Teaspoon.milliliters(),
    }
}

fn span(amount: f64, unit: &str, garlic: bool) -> Option<Span> {
    match classify(unit) {
        UnitKind::Count => Some(Span {
            min: amount,
            max: amount,
            base: Some(unit.trim().to_string()),
            from_volume: false,
        }),
        UnitKind::Range => Some(match parse_range(unit) {
            Some(range) => {
                let (min, max) = match range.lower {
                    Some(lower) => (lower.min(range.upper), lower.max(range.upper)),
                    None => (amount, range.upper.max(amount)),
                };
                Span {
                    min,
                    max,
                    base: range.base,
                    from_volume: false,
                }
            }
            // Unreadable range text counts as a point at the stated amount
            None => Span {
                min: amount,
                max: amount,
                base: None,
                from_volume: false,
            },
        }),
        UnitKind::Volume(volume) if garlic => {
            let cloves = amount * garlic_teaspoons_per(volume);
            Some(Span {
                min: cloves,
                max: cloves,
                base: None,
                from_volume: true,
            })
        }
        _ => None,
    }
}

fn is_clove(base: &str) -> bool {
    matches!(normalize_unit(base).as_str(), "clove" | "cloves")
}

/// Sum two spans, or `None` when they do not describe the same thing
///
/// Garlic volumes are clove counts, so they only fold with cloves or a bare
/// number and always come out labelled `cloves`.
fn fold_spans(existing: Span, new: Span) -> Option<(f64, String)> {
    if existing.from_volume && new.from_volume {
        return None;
    }
    let from_volume = existing.from_volume || new.from_volume;
    let base = if from_volume {
        let count_base = existing.base.as_deref().or(new.base.as_deref());
        if count_base.is_some_and(|b| !is_clove(b)) {
            return None;
        }
        Some("cloves".to_string())
    } else {
        existing.base.or(new.base)
    };

    let min = existing.min + new.min;
    let max = existing.max + new.max;
    if (min - max).abs() < RANGE_EPSILON {
        return Some((min, base.unwrap_or_else(|| "pieces".to_string())));
    }

    let unit = match base {
        Some(base) => format!("to {} {}", format_bound(max), base),
        None => format!("to {}", format_bound(max)),
    };
    Some((min, unit))
}

fn garlic_teaspoons(amount: f64, unit: &str) -> Option<f64> {
    match classify(unit) {
        UnitKind::Count if is_clove(unit) => Some(amount),
        UnitKind::Volume(v @ (VolumeUnit::Teaspoon | VolumeUnit::Tablespoon)) => {
            Some(amount * garlic_teaspoons_per(v))
        }
        _ => None,
    }
}

/// Merge two quantities of what the caller already decided is the same item
///
/// Rules, first applicable wins:
/// 1. both unmeasured: amount 0, existing label unless it is empty
/// 2. one unmeasured: the measured side verbatim
/// 3. both count or range (garlic volumes count as cloves): sum bounds;
///    range text with unreadable bounds counts as a point at its amount
/// 4. same unit string: add
/// 5. garlic in cloves/tsp/tbsp: sum in tsp, whole tbsp when divisible by 3
/// 6. both volume: sum via milliliters, shown in the existing unit
/// 7. both weight: sum via grams, shown in the existing unit
/// 8. anything else: existing quantity unchanged
pub fn consolidate(
    existing_amount: f64,
    existing_unit: &str,
    new_amount: f64,
    new_unit: &str,
    ingredient_name: &str,
) -> (f64, String) {
    consolidate_quantities(
        existing_amount,
        existing_unit,
        new_amount,
        new_unit,
        ingredient_name,
        is_garlic(ingredient_name),
    )
}

fn consolidate_quantities(
    existing_amount: f64,
    existing_unit: &str,
    new_amount: f64,
    new_unit: &str,
    ingredient_name: &str,
    garlic: bool,
) -> (f64, String) {
    let existing_zero = is_zero_like(existing_amount, existing_unit);
    let new_zero = is_zero_like(new_amount, new_unit);

    if existing_zero && new_zero {
        let label = if existing_unit.trim().is_empty() {
            new_unit
        } else {
            existing_unit
        };
        return (0.0, label.trim().to_string());
    }
    if existing_zero {
        return (new_amount, new_unit.to_string());
    }
    if new_zero {
        return (existing_amount, existing_unit.to_string());
    }

    if let (Some(a), Some(b)) = (
        span(existing_amount, existing_unit, garlic),
        span(new_amount, new_unit, garlic),
    ) {
        if let Some(folded) = fold_spans(a, b) {
            return folded;
        }
    }

    if normalize_unit(existing_unit) == normalize_unit(new_unit) {
        return (existing_amount + new_amount, existing_unit.to_string());
    }

    if garlic {
        if let (Some(a), Some(b)) = (
            garlic_teaspoons(existing_amount, existing_unit),
            garlic_teaspoons(new_amount, new_unit),
        ) {
            let tsp = a + b;
            let tbsp = tsp / 3.0;
            return if (tbsp - tbsp.round()).abs() < RANGE_EPSILON {
                (tbsp.round(), "tbsp".to_string())
            } else {
                (tsp, "tsp".to_string())
            };
        }
    }

    match (classify(existing_unit), classify(new_unit)) {
        (UnitKind::Volume(_), UnitKind::Volume(_)) => {
            let ml = volume_to_milliliters(existing_amount, existing_unit).unwrap_or(0.0)
                + volume_to_milliliters(new_amount, new_unit).unwrap_or(0.0);
            milliliters_to_volume(ml, existing_unit)
        }
        (UnitKind::Weight(_), UnitKind::Weight(_)) => {
            let grams = weight_to_grams(existing_amount, existing_unit).unwrap_or(0.0)
                + weight_to_grams(new_amount, new_unit).unwrap_or(0.0);
            grams_to_weight(grams, existing_unit)
        }
        _ => {
            debug!(
                "Cannot combine '{}' with '{}' for '{}', keeping existing quantity",
                existing_unit, new_unit, ingredient_name
            );
            (existing_amount, existing_unit.to_string())
        }
    }
}

/// What happened to an entry folded into a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fold {
    /// Merged into the existing entry with this id
    Merged(Uuid),
    /// Appended as a new entry with this id
    Appended(Uuid),
}

/// Merge `incoming` into `existing` in place
///
/// A purchased entry becomes unpurchased again when a measured amount
/// changes its quantity. Garlic handling applies when either name is garlic,
/// since permissive matching pairs synonyms such as "minced garlic".
pub fn merge(existing: &mut Ingredient, incoming: &Ingredient) {
    let (amount, unit) = consolidate_quantities(
        existing.amount,
        &existing.unit,
        incoming.amount,
        &incoming.unit,
        &existing.name,
        is_garlic(&existing.name) || is_garlic(&incoming.name),
    );

    let changed = amount != existing.amount || unit != existing.unit;
    if changed && existing.is_checked && !incoming.is_zero_like() {
        existing.is_checked = false;
    }

    debug!(
        "Merged '{}' into '{}': {} {} -> {} {}",
        incoming.name,
        existing.name,
        format_amount(existing.amount),
        existing.unit,
        format_amount(amount),
        unit
    );
    existing.amount = amount;
    existing.unit = unit;
}

/// Fold one entry into `entries`: first visible match wins, otherwise append
pub fn fold_into(entries: &mut Vec<Ingredient>, incoming: Ingredient, matcher: &Matcher) -> Fold {
    let found = entries
        .iter_mut()
        .find(|entry| !entry.is_removed && matcher.is_match(entry, &incoming));

    match found {
        Some(existing) => {
            merge(existing, &incoming);
            Fold::Merged(existing.id)
        }
        None => {
            let id = incoming.id;
            debug!("Appending '{}'", incoming.name);
            entries.push(incoming);
            Fold::Appended(id)
        }
    }
}
