//! FitTrack Tools module
//!
//! MCP tool implementations. Each tool validates its input, calls the
//! metrics engine and models, and returns a serializable response.

pub mod dashboard;
pub mod foods;
pub mod logs;
pub mod profile;
pub mod status;

use chrono::NaiveDate;

/// Validate an ISO `YYYY-MM-DD` date and return it normalized
pub(crate) fn validate_date(date: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| format!("Invalid date '{}': expected YYYY-MM-DD", date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert_eq!(validate_date("2025-01-09").unwrap(), "2025-01-09");
        assert_eq!(validate_date(" 2025-01-09 ").unwrap(), "2025-01-09");
        assert!(validate_date("2025-02-30").is_err());
        assert!(validate_date("yesterday").is_err());
    }
}
