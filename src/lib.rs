//! FitTrack Library
//!
//! Core functionality for food, water, sleep, mood and body metric tracking.

pub mod build_info;
pub mod config;
pub mod db;
pub mod mcp;
pub mod metrics;
pub mod models;
pub mod tools;
