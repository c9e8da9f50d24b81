//! Portion scaling
//!
//! Turns a per-100g food reference and a gram quantity into the nutrient
//! totals that get logged.

use serde::{Deserialize, Serialize};

use super::error::{ensure_finite, ensure_positive, MetricsError, MetricsResult};
use super::Nutrients;

/// Reference quantity the per-100g values are expressed against
pub const REFERENCE_GRAMS: f64 = 100.0;

/// Nutrient content of a food per 100 grams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodReference {
    pub name: String,
    pub kcal_per_100g: f64,
    pub proteins_per_100g: f64,
    pub carbs_per_100g: f64,
    pub fats_per_100g: f64,
}

impl FoodReference {
    /// Per-100g values as a `Nutrients` block
    pub fn per_100g(&self) -> Nutrients {
        Nutrients {
            kcal: self.kcal_per_100g,
            proteins: self.proteins_per_100g,
            carbs: self.carbs_per_100g,
            fats: self.fats_per_100g,
        }
    }

    /// Check that every nutrient field is a finite, non-negative number
    pub fn validate(&self) -> MetricsResult<()> {
        ensure_finite("kcal_per_100g", self.kcal_per_100g, false)?;
        ensure_finite("proteins_per_100g", self.proteins_per_100g, false)?;
        ensure_finite("carbs_per_100g", self.carbs_per_100g, false)?;
        ensure_finite("fats_per_100g", self.fats_per_100g, false)?;
        Ok(())
    }
}

/// A gram quantity of a food with its derived nutrient totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodPortion {
    pub food_name: String,
    pub grams: f64,
    #[serde(flatten)]
    pub nutrients: Nutrients,
}

/// Scale a food reference to a portion of `grams`
///
/// Every nutrient is multiplied by `grams / 100`, so the result is linear in
/// `grams`. Fails with `InvalidInput` for non-positive grams, a reference
/// carrying non-numeric or negative values, or a product that overflows.
pub fn scale_portion(reference: &FoodReference, grams: f64) -> MetricsResult<FoodPortion> {
    ensure_positive("grams", grams)?;
    reference.validate()?;

    let nutrients = reference.per_100g().scale(grams / REFERENCE_GRAMS);
    if !nutrients.is_finite() {
        return Err(MetricsError::invalid(format!(
            "{} g of {} is too large to compute nutrients for",
            grams, reference.name
        )));
    }

    Ok(FoodPortion {
        food_name: reference.name.clone(),
        grams,
        nutrients,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsError;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn chicken() -> FoodReference {
        FoodReference {
            name: "Chicken Breast".to_string(),
            kcal_per_100g: 165.0,
            proteins_per_100g: 31.0,
            carbs_per_100g: 0.0,
            fats_per_100g: 3.6,
        }
    }

    #[test]
    fn test_half_portion() {
        let reference = FoodReference {
            name: "Test".to_string(),
            kcal_per_100g: 200.0,
            proteins_per_100g: 10.0,
            carbs_per_100g: 20.0,
            fats_per_100g: 8.0,
        };
        let portion = scale_portion(&reference, 50.0).unwrap();
        assert_eq!(portion.food_name, "Test");
        assert!(approx(portion.grams, 50.0));
        assert!(approx(portion.nutrients.kcal, 100.0));
        assert!(approx(portion.nutrients.proteins, 5.0));
        assert!(approx(portion.nutrients.carbs, 10.0));
        assert!(approx(portion.nutrients.fats, 4.0));
    }

    #[test]
    fn test_scaling_is_linear() {
        let reference = chicken();
        let base = scale_portion(&reference, 120.0).unwrap();
        for k in [0.25, 2.0, 3.5, 10.0] {
            let scaled = scale_portion(&reference, 120.0 * k).unwrap();
            assert!(approx(scaled.nutrients.kcal, base.nutrients.kcal * k));
            assert!(approx(scaled.nutrients.proteins, base.nutrients.proteins * k));
            assert!(approx(scaled.nutrients.carbs, base.nutrients.carbs * k));
            assert!(approx(scaled.nutrients.fats, base.nutrients.fats * k));
        }
    }

    #[test]
    fn test_reference_quantity_is_identity() {
        let portion = scale_portion(&chicken(), REFERENCE_GRAMS).unwrap();
        assert_eq!(portion.nutrients, chicken().per_100g());
    }

    #[test]
    fn test_rejects_non_positive_grams() {
        assert!(matches!(scale_portion(&chicken(), 0.0), Err(MetricsError::InvalidInput(_))));
        assert!(matches!(scale_portion(&chicken(), -5.0), Err(MetricsError::InvalidInput(_))));
        assert!(matches!(scale_portion(&chicken(), f64::NAN), Err(MetricsError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_overflowing_portion() {
        let err = scale_portion(&chicken(), f64::MAX);
        assert!(matches!(err, Err(MetricsError::InvalidInput(_))));

        // Large but representable portions still scale
        let big = scale_portion(&chicken(), 1.0e300).unwrap();
        assert!(big.nutrients.is_finite());
    }

    #[test]
    fn test_rejects_non_numeric_reference() {
        let mut reference = chicken();
        reference.fats_per_100g = f64::NAN;
        assert!(matches!(scale_portion(&reference, 100.0), Err(MetricsError::InvalidInput(_))));

        let mut reference = chicken();
        reference.kcal_per_100g = f64::INFINITY;
        assert!(matches!(scale_portion(&reference, 100.0), Err(MetricsError::InvalidInput(_))));

        let mut reference = chicken();
        reference.carbs_per_100g = -1.0;
        assert!(matches!(scale_portion(&reference, 100.0), Err(MetricsError::InvalidInput(_))));
    }

    #[test]
    fn test_portion_serializes_flat() {
        let portion = scale_portion(&chicken(), 200.0).unwrap();
        let json = serde_json::to_value(&portion).unwrap();
        assert_eq!(json["food_name"], "Chicken Breast");
        assert_eq!(json["kcal"], 330.0);
        assert_eq!(json["proteins"], 62.0);
    }
}
