//! Unit vocabulary and classification.
//!
//! Every place that needs to know what a unit string means goes through
//! [`classify`], so the recognised vocabulary lives in exactly one spot.

pub mod convert;

use regex::Regex;
use std::sync::LazyLock;

pub use convert::{grams_to_weight, milliliters_to_volume, volume_to_milliliters, weight_to_grams};

/// Units that mean "no specific quantity"
const ZERO_UNITS: &[&str] = &["", "to taste", "for serving"];

/// Discrete-item units and size descriptors
const COUNT_UNITS: &[&str] = &[
    "piece", "pieces", "clove", "cloves", "sprig", "sprigs", "leaf", "leaves", "head", "heads",
    "bunch", "bunches", "small", "medium", "large", "serving", "servings",
];

/// `"to 15"`, `"to 15 cloves"`
static TO_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^to\s+(\d+(?:\.\d+)?)(?:\s+(\p{L}+))?$").unwrap()
});

/// `"12-15"`, `"12 – 15 sprigs"`
static DASH_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*[-–]\s*(\d+(?:\.\d+)?)(?:\s+(\p{L}+))?$").unwrap()
});

/// Text that reads as a range even when its bounds cannot be parsed,
/// e.g. `"to fifteen"` or `"12-15 fresh sprigs"`
static RANGE_SHAPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:to\s+\S|\d+(?:\.\d+)?\s*[-–]\s*\d)").unwrap()
});

/// Dimension a unit string belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Unmeasured: empty, "to taste", "for serving"
    Zero,
    Count,
    Volume(VolumeUnit),
    Weight(WeightUnit),
    /// Range-like text; see [`parse_range`] for the bounds, which may be unreadable
    Range,
    /// Only compatible with an identical unit string
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeUnit {
    Teaspoon,
    Tablespoon,
    Cup,
    Pint,
    Quart,
    Gallon,
    Milliliter,
    Liter,
}

impl VolumeUnit {
    /// Recognise full names, plurals and common abbreviations
    pub fn parse(unit: &str) -> Option<Self> {
        let unit = normalize_unit(unit);
        let parsed = match unit.as_str() {
            "tsp" | "tsps" | "teaspoon" | "teaspoons" => VolumeUnit::Teaspoon,
            "tbsp" | "tbsps" | "tbs" | "tablespoon" | "tablespoons" => VolumeUnit::Tablespoon,
            "cup" | "cups" => VolumeUnit::Cup,
            "pint" | "pints" | "pt" | "pts" => VolumeUnit::Pint,
            "quart" | "quarts" | "qt" | "qts" => VolumeUnit::Quart,
            "gallon" | "gallons" | "gal" | "gals" => VolumeUnit::Gallon,
            "ml" | "mls" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                VolumeUnit::Milliliter
            }
            "l" | "liter" | "liters" | "litre" | "litres" => VolumeUnit::Liter,
            _ => return None,
        };
        Some(parsed)
    }

    /// Size of one unit in milliliters
    pub fn milliliters(self) -> f64 {
        match self {
            VolumeUnit::Teaspoon => 4.92892,
            VolumeUnit::Tablespoon => 14.7868,
            VolumeUnit::Cup => 236.588,
            VolumeUnit::Pint => 473.176,
            VolumeUnit::Quart => 946.353,
            VolumeUnit::Gallon => 3785.41,
            VolumeUnit::Milliliter => 1.0,
            VolumeUnit::Liter => 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    Ounce,
    Pound,
    Gram,
    Kilogram,
}

impl WeightUnit {
    pub fn parse(unit: &str) -> Option<Self> {
        let unit = normalize_unit(unit);
        let parsed = match unit.as_str() {
            "oz" | "ozs" | "ounce" | "ounces" => WeightUnit::Ounce,
            "lb" | "lbs" | "pound" | "pounds" => WeightUnit::Pound,
            "g" | "gs" | "gram" | "grams" | "gramme" | "grammes" => WeightUnit::Gram,
            "kg" | "kgs" | "kilogram" | "kilograms" | "kilo" | "kilos" => WeightUnit::Kilogram,
            _ => return None,
        };
        Some(parsed)
    }

    /// Size of one unit in grams
    pub fn grams(self) -> f64 {
        match self {
            WeightUnit::Ounce => 28.35,
            WeightUnit::Pound => 453.59,
            WeightUnit::Gram => 1.0,
            WeightUnit::Kilogram => 1000.0,
        }
    }
}

/// Bounds carried inside a range-like unit string
#[derive(Debug, Clone, PartialEq)]
pub struct RangeUnit {
    /// Present for `"12-15"`; `"to 15"` takes its lower bound from the amount
    pub lower: Option<f64>,
    pub upper: f64,
    /// Trailing word such as "cloves"
    pub base: Option<String>,
}

/// Trimmed, lower-cased unit with a trailing abbreviation dot removed
pub fn normalize_unit(unit: &str) -> String {
    unit.trim().trim_end_matches('.').trim().to_lowercase()
}

/// Categorize a free-text unit string
pub fn classify(unit: &str) -> UnitKind {
    let key = normalize_unit(unit);

    if ZERO_UNITS.contains(&key.as_str()) {
        UnitKind::Zero
    } else if COUNT_UNITS.contains(&key.as_str()) {
        UnitKind::Count
    } else if parse_range(&key).is_some() || RANGE_SHAPED.is_match(&key) {
        UnitKind::Range
    } else if let Some(volume) = VolumeUnit::parse(&key) {
        UnitKind::Volume(volume)
    } else if let Some(weight) = WeightUnit::parse(&key) {
        UnitKind::Weight(weight)
    } else {
        UnitKind::Unknown
    }
}

/// Parse `"to X [word]"` or `"A-B [word]"`
pub fn parse_range(unit: &str) -> Option<RangeUnit> {
    let key = normalize_unit(unit);

    if let Some(caps) = TO_RANGE.captures(&key) {
        return Some(RangeUnit {
            lower: None,
            upper: caps[1].parse().ok()?,
            base: caps.get(2).map(|m| m.as_str().to_string()),
        });
    }

    let caps = DASH_RANGE.captures(&key)?;
    Some(RangeUnit {
        lower: Some(caps[1].parse().ok()?),
        upper: caps[2].parse().ok()?,
        base: caps.get(3).map(|m| m.as_str().to_string()),
    })
}

/// An entry is unmeasured when its unit is zero-like or its amount is not positive
///
/// Range units carry their own upper bound, so a zero amount on a range
/// still counts as measured.
pub fn is_zero_like(amount: f64, unit: &str) -> bool {
    match classify(unit) {
        UnitKind::Zero => true,
        UnitKind::Range => false,
        _ => amount <= 0.0,
    }
}

/// Render a range bound precisely enough to be read back without drift
pub fn format_bound(amount: f64) -> String {
    let text = format!("{:.6}", amount);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Render an amount with at most two decimals and no trailing zeros
pub fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.2}", rounded)
            .trim_end_matches('0')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_zero_like() {
        assert_eq!(classify(""), UnitKind::Zero);
        assert_eq!(classify("   "), UnitKind::Zero);
        assert_eq!(classify("To Taste"), UnitKind::Zero);
        assert_eq!(classify(" for serving "), UnitKind::Zero);
    }

    #[test]
    fn test_classify_count_like() {
        for unit in ["piece", "Pieces", "clove", "cloves", "sprigs", "leaves", "head", "bunch", "large", "servings"] {
            assert_eq!(classify(unit), UnitKind::Count, "{}", unit);
        }
    }

    #[test]
    fn test_classify_ranges() {
        assert_eq!(classify("to 15"), UnitKind::Range);
        assert_eq!(classify("to 15 cloves"), UnitKind::Range);
        assert_eq!(classify("12-15"), UnitKind::Range);
        assert_eq!(classify("12 – 15 sprigs"), UnitKind::Range);
        assert_eq!(classify("to 1.5"), UnitKind::Range);
    }

    #[test]
    fn test_classify_unreadable_ranges() {
        for unit in ["to fifteen", "to 15 fresh cloves", "12-15 fresh sprigs"] {
            assert_eq!(classify(unit), UnitKind::Range, "{}", unit);
            assert!(parse_range(unit).is_none(), "{}", unit);
        }
        assert_eq!(classify("to taste"), UnitKind::Zero);
    }

    #[test]
    fn test_classify_volume_and_weight() {
        assert_eq!(classify("tsp"), UnitKind::Volume(VolumeUnit::Teaspoon));
        assert_eq!(classify("Tablespoons"), UnitKind::Volume(VolumeUnit::Tablespoon));
        assert_eq!(classify("tbsp."), UnitKind::Volume(VolumeUnit::Tablespoon));
        assert_eq!(classify("cups"), UnitKind::Volume(VolumeUnit::Cup));
        assert_eq!(classify("L"), UnitKind::Volume(VolumeUnit::Liter));
        assert_eq!(classify("oz"), UnitKind::Weight(WeightUnit::Ounce));
        assert_eq!(classify("lbs"), UnitKind::Weight(WeightUnit::Pound));
        assert_eq!(classify("grams"), UnitKind::Weight(WeightUnit::Gram));
        assert_eq!(classify("kg"), UnitKind::Weight(WeightUnit::Kilogram));
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify("pinch"), UnitKind::Unknown);
        assert_eq!(classify("can"), UnitKind::Unknown);
        assert_eq!(classify("to"), UnitKind::Unknown);
    }

    #[test]
    fn test_parse_range_bounds() {
        let to = parse_range("to 15 cloves").unwrap();
        assert_eq!(to.lower, None);
        assert_eq!(to.upper, 15.0);
        assert_eq!(to.base.as_deref(), Some("cloves"));

        let dash = parse_range("12-15").unwrap();
        assert_eq!(dash.lower, Some(12.0));
        assert_eq!(dash.upper, 15.0);
        assert_eq!(dash.base, None);

        assert!(parse_range("to taste").is_none());
        assert!(parse_range("cups").is_none());
    }

    #[test]
    fn test_is_zero_like() {
        assert!(is_zero_like(0.0, "cups"));
        assert!(is_zero_like(2.0, "To Taste"));
        assert!(!is_zero_like(2.0, "cups"));
        assert!(!is_zero_like(0.0, "to 3 cloves"));
        assert!(is_zero_like(0.0, ""));
    }

    #[test]
    fn test_format_bound_keeps_precision() {
        assert_eq!(format_bound(25.0), "25");
        assert_eq!(format_bound(6.665), "6.665");
        assert_eq!(format_bound(1.333 * 5.0), "6.665");
        assert_eq!(format_bound(2.5), "2.5");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(25.0), "25");
        assert_eq!(format_amount(2.5), "2.5");
        assert_eq!(format_amount(1.0 / 3.0), "0.33");
        assert_eq!(format_amount(23.999_9), "24");
    }
}
