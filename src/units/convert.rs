//! Volume and weight conversion through milliliters and grams.
//!
//! Volume and weight are never converted into each other. The to-base
//! functions return `None` for units outside their dimension.

use super::{VolumeUnit, WeightUnit};

pub fn volume_to_milliliters(amount: f64, unit: &str) -> Option<f64> {
    VolumeUnit::parse(unit).map(|u| amount * u.milliliters())
}

/// Express `ml` in `preferred_unit`, falling back to tablespoons
pub fn milliliters_to_volume(ml: f64, preferred_unit: &str) -> (f64, String) {
    match VolumeUnit::parse(preferred_unit) {
        Some(unit) => (ml / unit.milliliters(), preferred_unit.trim().to_string()),
        None => (
            ml / VolumeUnit::Tablespoon.milliliters(),
            "tbsp".to_string(),
        ),
    }
}

pub fn weight_to_grams(amount: f64, unit: &str) -> Option<f64> {
    WeightUnit::parse(unit).map(|u| amount * u.grams())
}

/// Express `grams` in `preferred_unit`, falling back to grams
pub fn grams_to_weight(grams: f64, preferred_unit: &str) -> (f64, String) {
    match WeightUnit::parse(preferred_unit) {
        Some(unit) => (grams / unit.grams(), preferred_unit.trim().to_string()),
        None => (grams, "g".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-3;

    #[test]
    fn test_cups_round_trip() {
        for x in [0.25, 1.0, 2.5, 13.0] {
            let ml = volume_to_milliliters(x, "cups").unwrap();
            let (back, unit) = milliliters_to_volume(ml, "cups");
            assert!((back - x).abs() < EPSILON);
            assert_eq!(unit, "cups");
        }
    }

    #[test]
    fn test_volume_ratios() {
        assert!((volume_to_milliliters(1.0, "tbsp").unwrap() - 14.7868).abs() < EPSILON);
        assert!((volume_to_milliliters(2.0, "l").unwrap() - 2000.0).abs() < EPSILON);
        let (tsp, _) = milliliters_to_volume(14.7868, "tsp");
        assert!((tsp - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_unknown_preferred_volume_falls_back_to_tablespoons() {
        let (amount, unit) = milliliters_to_volume(29.5736, "splash");
        assert_eq!(unit, "tbsp");
        assert!((amount - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_weight_conversion() {
        let grams = weight_to_grams(1.0, "lb").unwrap();
        let (oz, unit) = grams_to_weight(grams, "oz");
        assert_eq!(unit, "oz");
        assert!((oz - 453.59 / 28.35).abs() < EPSILON);

        let (g, unit) = grams_to_weight(1500.0, "stone");
        assert_eq!(unit, "g");
        assert_eq!(g, 1500.0);
    }

    #[test]
    fn test_cross_dimension_is_not_convertible() {
        assert!(volume_to_milliliters(1.0, "oz").is_none());
        assert!(weight_to_grams(1.0, "cup").is_none());
        assert!(volume_to_milliliters(1.0, "cloves").is_none());
    }
}
