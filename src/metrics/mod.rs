//! Metrics engine
//!
//! Pure, stateless health computations: portion scaling, BMI, calorie
//! targets and goal progress. Nothing here touches the database.

pub mod bmi;
pub mod energy;
pub mod error;
pub mod nutrients;
pub mod portion;
pub mod progress;

pub use bmi::{calculate_bmi, classify_bmi, BmiCategory, BmiClassification, Severity};
pub use energy::{daily_calorie_target, Gender, Goal, UserMetrics};
pub use error::{MetricsError, MetricsResult};
pub use nutrients::Nutrients;
pub use portion::{scale_portion, FoodPortion, FoodReference};
pub use progress::{progress_ratio, GoalProgress, DEFAULT_WATER_GOAL_ML};
