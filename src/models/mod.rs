//! Data models
//!
//! Rust structs representing database entities.

mod food_item;
mod food_log;
mod mood_log;
mod profile;
mod sleep_log;
mod water_log;

pub use food_item::{FoodItem, FoodItemCreate};
pub use food_log::{FoodLog, FoodLogEntry};
pub use mood_log::{Mood, MoodLog};
pub use profile::{Profile, ProfileSet};
pub use sleep_log::{SleepLog, SleepQuality};
pub use water_log::{WaterEntry, WaterLog};
