//! Shared nutrient totals
//!
//! Used by food portions, food logs and the dashboard.

use serde::{Deserialize, Serialize};

/// Energy and macronutrient amounts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub kcal: f64,
    pub proteins: f64, // grams
    pub carbs: f64,    // grams
    pub fats: f64,     // grams
}

impl Nutrients {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale every field by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            kcal: self.kcal * multiplier,
            proteins: self.proteins * multiplier,
            carbs: self.carbs * multiplier,
            fats: self.fats * multiplier,
        }
    }

    /// True when every field is a finite number
    pub fn is_finite(&self) -> bool {
        [self.kcal, self.proteins, self.carbs, self.fats]
            .iter()
            .all(|v| v.is_finite())
    }

    pub fn add(&self, other: &Nutrients) -> Self {
        Self {
            kcal: self.kcal + other.kcal,
            proteins: self.proteins + other.proteins,
            carbs: self.carbs + other.carbs,
            fats: self.fats + other.fats,
        }
    }
}

impl std::ops::Add for Nutrients {
    type Output = Nutrients;

    fn add(self, other: Nutrients) -> Nutrients {
        Nutrients::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Nutrients {
    type Output = Nutrients;

    fn mul(self, multiplier: f64) -> Nutrients {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Nutrients {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrients::zero(), |acc, n| acc + n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_of_entries() {
        let a = Nutrients { kcal: 100.0, proteins: 10.0, carbs: 5.0, fats: 2.0 };
        let b = Nutrients { kcal: 50.0, proteins: 1.0, carbs: 12.5, fats: 0.5 };

        let total: Nutrients = vec![a, b].into_iter().sum();
        assert_eq!(total, Nutrients { kcal: 150.0, proteins: 11.0, carbs: 17.5, fats: 2.5 });
    }

    #[test]
    fn test_empty_sum_is_zero() {
        let total: Nutrients = Vec::<Nutrients>::new().into_iter().sum();
        assert_eq!(total, Nutrients::zero());
    }
}
