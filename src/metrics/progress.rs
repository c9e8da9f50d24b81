//! Goal progress
//!
//! Consumption relative to a daily goal, for calorie and water bars.

use serde::{Deserialize, Serialize};

/// Default daily water goal in milliliters
pub const DEFAULT_WATER_GOAL_ML: i64 = 2000;

/// Progress toward a goal
///
/// `raw_percent` is unbounded for numeric display; `clamped_percent` stays in
/// [0, 100] for bar fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub consumed: f64,
    pub goal: f64,
    pub raw_percent: f64,
    pub clamped_percent: f64,
}

impl GoalProgress {
    pub fn is_met(&self) -> bool {
        self.raw_percent >= 100.0
    }
}

/// Percentage of `goal` reached by `consumed`
///
/// A non-positive or non-numeric goal yields 0% rather than a division error.
pub fn progress_ratio(consumed: f64, goal: f64) -> GoalProgress {
    let raw_percent = if goal > 0.0 && goal.is_finite() && consumed.is_finite() {
        consumed / goal * 100.0
    } else {
        0.0
    };

    GoalProgress {
        consumed,
        goal,
        raw_percent,
        clamped_percent: raw_percent.clamp(0.0, 100.0),
    }
}
