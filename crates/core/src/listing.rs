//! List-view helpers shared by every admin list endpoint.

use crate::error::CoreError;

/// Rows per page when the client does not ask for a size.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Upper bound on a single page.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Clamp a user-provided limit to `[1, max]`, defaulting when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Date-hierarchy drill-down over a timestamp column (year, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateDrilldown {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl DateDrilldown {
    /// Reject a month without a year, or a month outside `1..=12`.
    pub fn validate(self) -> Result<Self, CoreError> {
        if let Some(month) = self.month {
            if self.year.is_none() {
                return Err(CoreError::Validation(
                    "added_month requires added_year".to_string(),
                ));
            }
            if !(1..=12).contains(&month) {
                return Err(CoreError::Validation(format!(
                    "added_month must be between 1 and 12, got {month}"
                )));
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT), 100);
    }

    #[test]
    fn clamp_limit_respects_bounds() {
        assert_eq!(clamp_limit(Some(9000), 100, 500), 500);
        assert_eq!(clamp_limit(Some(0), 100, 500), 1);
        assert_eq!(clamp_limit(Some(-3), 100, 500), 1);
        assert_eq!(clamp_limit(Some(42), 100, 500), 42);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(Some(25)), 25);
    }

    #[test]
    fn drilldown_rules() {
        assert!(DateDrilldown::default().validate().is_ok());
        assert!(DateDrilldown { year: Some(2024), month: None }.validate().is_ok());
        assert!(DateDrilldown { year: Some(2024), month: Some(12) }.validate().is_ok());
        assert_matches!(
            DateDrilldown { year: None, month: Some(3) }.validate(),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            DateDrilldown { year: Some(2024), month: Some(13) }.validate(),
            Err(CoreError::Validation(_))
        );
    }
}
