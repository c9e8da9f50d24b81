//! Daily energy targets
//!
//! Harris-Benedict BMR, a fixed moderate activity factor and a goal-based
//! adjustment.

use serde::{Deserialize, Serialize};

use super::bmi::calculate_bmi;
use super::error::{ensure_positive, MetricsError, MetricsResult};

/// Activity multiplier applied to BMR (moderately active)
pub const MODERATE_ACTIVITY_FACTOR: f64 = 1.55;

/// Daily kcal deficit or surplus for lose/gain goals
pub const GOAL_ADJUSTMENT_KCAL: f64 = 500.0;

pub const MAX_AGE: u32 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Anything other than "male" uses the female coefficients
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "male" => Gender::Male,
            _ => Gender::Female,
        }
    }
}

/// Weight goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Lose => "lose",
            Goal::Maintain => "maintain",
            Goal::Gain => "gain",
        }
    }

    pub fn parse(s: &str) -> MetricsResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "lose" => Ok(Goal::Lose),
            "maintain" => Ok(Goal::Maintain),
            "gain" => Ok(Goal::Gain),
            other => Err(MetricsError::invalid(format!(
                "goal must be one of lose, maintain, gain; got '{}'",
                other
            ))),
        }
    }

    fn adjustment(&self) -> f64 {
        match self {
            Goal::Lose => -GOAL_ADJUSTMENT_KCAL,
            Goal::Maintain => 0.0,
            Goal::Gain => GOAL_ADJUSTMENT_KCAL,
        }
    }
}

fn ensure_age(age: u32) -> MetricsResult<u32> {
    if age == 0 || age > MAX_AGE {
        return Err(MetricsError::invalid(format!(
            "age must be between 1 and {}, got {}",
            MAX_AGE, age
        )));
    }
    Ok(age)
}

/// Basal metabolic rate (revised Harris-Benedict)
pub fn basal_metabolic_rate(age: u32, gender: Gender, weight_kg: f64, height_cm: f64) -> MetricsResult<f64> {
    let age = ensure_age(age)? as f64;
    let weight = ensure_positive("weight_kg", weight_kg)?;
    let height = ensure_positive("height_cm", height_cm)?;

    let bmr = match gender {
        Gender::Male => 88.362 + 13.397 * weight + 4.799 * height - 5.677 * age,
        Gender::Female => 447.593 + 9.247 * weight + 3.098 * height - 4.330 * age,
    };
    Ok(bmr)
}

/// Daily calorie target in kcal, truncated toward zero
pub fn daily_calorie_target(
    age: u32,
    gender: Gender,
    weight_kg: f64,
    height_cm: f64,
    goal: Goal,
) -> MetricsResult<i64> {
    let tdee = basal_metabolic_rate(age, gender, weight_kg, height_cm)? * MODERATE_ACTIVITY_FACTOR;
    Ok((tdee + goal.adjustment()).trunc() as i64)
}

/// Body metrics with their derived values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMetrics {
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub goal: Goal,
    pub bmi: f64,
    pub daily_calorie_target: i64,
}

impl UserMetrics {
    /// Compute BMI and calorie target from the raw body measurements
    pub fn derive(age: u32, gender: Gender, height_cm: f64, weight_kg: f64, goal: Goal) -> MetricsResult<Self> {
        Ok(Self {
            age,
            gender,
            height_cm,
            weight_kg,
            goal,
            bmi: calculate_bmi(weight_kg, height_cm)?,
            daily_calorie_target: daily_calorie_target(age, gender, weight_kg, height_cm, goal)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_male_maintain() {
        // BMR = 88.362 + 937.79 + 839.825 - 170.31 = 1695.667; x1.55 = 2628.28
        let target = daily_calorie_target(30, Gender::Male, 70.0, 175.0, Goal::Maintain).unwrap();
        assert_eq!(target, 2628);
    }

    #[test]
    fn test_female_goals() {
        // BMR = 447.593 + 554.82 + 511.17 - 108.25 = 1405.333; x1.55 = 2178.26
        let maintain = daily_calorie_target(25, Gender::Female, 60.0, 165.0, Goal::Maintain).unwrap();
        let lose = daily_calorie_target(25, Gender::Female, 60.0, 165.0, Goal::Lose).unwrap();
        let gain = daily_calorie_target(25, Gender::Female, 60.0, 165.0, Goal::Gain).unwrap();
        assert_eq!(maintain, 2178);
        assert_eq!(lose, 1678);
        assert_eq!(gain, 2678);
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!(Gender::from_str("Male"), Gender::Male);
        assert_eq!(Gender::from_str("female"), Gender::Female);
        assert_eq!(Gender::from_str("other"), Gender::Female);
    }

    #[test]
    fn test_goal_parsing() {
        assert_eq!(Goal::parse("LOSE").unwrap(), Goal::Lose);
        assert_eq!(Goal::parse(" gain ").unwrap(), Goal::Gain);
        assert!(Goal::parse("bulk").is_err());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(daily_calorie_target(0, Gender::Male, 70.0, 175.0, Goal::Maintain).is_err());
        assert!(daily_calorie_target(200, Gender::Male, 70.0, 175.0, Goal::Maintain).is_err());
        assert!(daily_calorie_target(30, Gender::Male, 0.0, 175.0, Goal::Maintain).is_err());
        assert!(daily_calorie_target(30, Gender::Male, 70.0, -1.0, Goal::Maintain).is_err());
    }

    #[test]
    fn test_derive_user_metrics() {
        let m = UserMetrics::derive(30, Gender::Male, 175.0, 70.0, Goal::Lose).unwrap();
        assert_eq!(m.bmi, 22.86);
        assert_eq!(m.daily_calorie_target, 2128);
    }
}
