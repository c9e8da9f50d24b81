//! Body mass index
//!
//! BMI computation from height/weight and classification into the four
//! standard adult categories.

use serde::{Deserialize, Serialize};

use super::error::{ensure_positive, MetricsResult};

/// Lower bound of the Normal range
pub const BMI_NORMAL_MIN: f64 = 18.5;
/// Lower bound of the Overweight range
pub const BMI_OVERWEIGHT_MIN: f64 = 25.0;
/// Lower bound of the Obese range
pub const BMI_OBESE_MIN: f64 = 30.0;

/// BMI category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

/// How strongly a category should be flagged in a display
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Warning,
    Alert,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            BmiCategory::Normal => Severity::Ok,
            BmiCategory::Underweight | BmiCategory::Overweight => Severity::Warning,
            BmiCategory::Obese => Severity::Alert,
        }
    }
}

/// Result of `classify_bmi`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiClassification {
    pub bmi: f64,
    pub category: BmiCategory,
    pub label: String,
    pub severity: Severity,
}

/// Classify a BMI value
///
/// Ranges are half-open with the lower bound inclusive: 25.0 is Overweight,
/// 24.9 is Normal.
pub fn classify_bmi(bmi: f64) -> MetricsResult<BmiClassification> {
    ensure_positive("bmi", bmi)?;

    let category = if bmi < BMI_NORMAL_MIN {
        BmiCategory::Underweight
    } else if bmi < BMI_OVERWEIGHT_MIN {
        BmiCategory::Normal
    } else if bmi < BMI_OBESE_MIN {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    };

    Ok(BmiClassification {
        bmi,
        category,
        label: category.label().to_string(),
        severity: category.severity(),
    })
}

/// Compute BMI from weight (kg) and height (cm), rounded to 2 decimals
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> MetricsResult<f64> {
    ensure_positive("weight_kg", weight_kg)?;
    ensure_positive("height_cm", height_cm)?;

    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    Ok((bmi * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricsError;

    fn category(bmi: f64) -> BmiCategory {
        classify_bmi(bmi).unwrap().category
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(category(18.49), BmiCategory::Underweight);
        assert_eq!(category(18.5), BmiCategory::Normal);
        assert_eq!(category(24.9), BmiCategory::Normal);
        assert_eq!(category(25.0), BmiCategory::Overweight);
        assert_eq!(category(29.99), BmiCategory::Overweight);
        assert_eq!(category(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_labels_and_severity() {
        let c = classify_bmi(24.9).unwrap();
        assert_eq!(c.label, "Normal");
        assert_eq!(c.severity, Severity::Ok);

        let c = classify_bmi(25.0).unwrap();
        assert_eq!(c.label, "Overweight");
        assert_eq!(c.severity, Severity::Warning);

        assert_eq!(classify_bmi(16.0).unwrap().severity, Severity::Warning);
        assert_eq!(classify_bmi(42.0).unwrap().severity, Severity::Alert);
    }

    #[test]
    fn test_partition_is_total_and_ordered() {
        // Walk (0, 60] in small steps: every value maps to exactly one
        // category and categories never go backwards.
        let order = |c: BmiCategory| match c {
            BmiCategory::Underweight => 0,
            BmiCategory::Normal => 1,
            BmiCategory::Overweight => 2,
            BmiCategory::Obese => 3,
        };
        let mut last = 0;
        let mut seen = [false; 4];
        let mut bmi = 0.05;
        while bmi <= 60.0 {
            let rank = order(category(bmi));
            assert!(rank >= last, "category went backwards at {}", bmi);
            seen[rank] = true;
            last = rank;
            bmi += 0.05;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(matches!(classify_bmi(0.0), Err(MetricsError::InvalidInput(_))));
        assert!(matches!(classify_bmi(-3.0), Err(MetricsError::InvalidInput(_))));
        assert!(matches!(classify_bmi(f64::NAN), Err(MetricsError::InvalidInput(_))));
    }

    #[test]
    fn test_calculate_bmi() {
        assert_eq!(calculate_bmi(70.0, 175.0).unwrap(), 22.86);
        assert_eq!(calculate_bmi(100.0, 200.0).unwrap(), 25.0);
        assert!(calculate_bmi(70.0, 0.0).is_err());
        assert!(calculate_bmi(-1.0, 170.0).is_err());
    }
}
