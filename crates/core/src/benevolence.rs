//! The "is very benevolent" list filter.
//!
//! A hero is very benevolent when its `benevolence_factor` is strictly
//! greater than [`VERY_BENEVOLENT_THRESHOLD`]. Unset factors are never very
//! benevolent, so `Yes` and `No` partition every hero list.

use serde::Serialize;

use crate::error::CoreError;

/// Query parameter name used by the hero list endpoint.
pub const PARAMETER_NAME: &str = "is_very_benevolent";

/// Factors above this value (exclusive) count as very benevolent.
pub const VERY_BENEVOLENT_THRESHOLD: i32 = 75;

/// The two selectable filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BenevolenceChoice {
    Yes,
    No,
}

impl BenevolenceChoice {
    /// `(value, label)` pairs offered to the console, in display order.
    pub const LOOKUPS: &'static [(&'static str, &'static str)] = &[("Yes", "Yes"), ("No", "No")];

    /// Parse the raw query value. Only the exact strings `Yes` and `No` are
    /// accepted.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw {
            "Yes" => Ok(Self::Yes),
            "No" => Ok(Self::No),
            other => Err(CoreError::Validation(format!(
                "Invalid {PARAMETER_NAME} value '{other}'. Must be one of: Yes, No"
            ))),
        }
    }

    /// Whether a hero with the given factor belongs to this choice.
    pub fn matches(self, factor: Option<i32>) -> bool {
        let very = factor.is_some_and(is_very_benevolent);
        match self {
            Self::Yes => very,
            Self::No => !very,
        }
    }

    /// SQL predicate over `benevolence_factor` selecting this choice.
    ///
    /// `No` must keep NULL factors, so it is not a plain `<=`.
    pub fn sql_predicate(self, column: &str) -> String {
        match self {
            Self::Yes => format!("{column} > {VERY_BENEVOLENT_THRESHOLD}"),
            Self::No => {
                format!("({column} IS NULL OR {column} <= {VERY_BENEVOLENT_THRESHOLD})")
            }
        }
    }
}

/// The boolean list column shown next to each hero.
pub fn is_very_benevolent(factor: i32) -> bool {
    factor > VERY_BENEVOLENT_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn threshold_is_strict() {
        assert!(!is_very_benevolent(75));
        assert!(is_very_benevolent(76));
        assert!(!is_very_benevolent(0));
    }

    #[test]
    fn parse_accepts_exact_values_only() {
        assert_eq!(BenevolenceChoice::parse("Yes").unwrap(), BenevolenceChoice::Yes);
        assert_eq!(BenevolenceChoice::parse("No").unwrap(), BenevolenceChoice::No);
        assert_matches!(BenevolenceChoice::parse("yes"), Err(CoreError::Validation(_)));
        assert_matches!(BenevolenceChoice::parse(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn choices_partition_every_factor() {
        let factors = [None, Some(-1), Some(0), Some(75), Some(76), Some(100), Some(500)];
        for factor in factors {
            let yes = BenevolenceChoice::Yes.matches(factor);
            let no = BenevolenceChoice::No.matches(factor);
            assert!(yes ^ no, "factor {factor:?} must land in exactly one set");
        }
    }

    #[test]
    fn unset_factor_falls_in_no() {
        assert!(BenevolenceChoice::No.matches(None));
        assert!(!BenevolenceChoice::Yes.matches(None));
    }

    #[test]
    fn sql_predicate_keeps_nulls_for_no() {
        assert_eq!(
            BenevolenceChoice::Yes.sql_predicate("h.benevolence_factor"),
            "h.benevolence_factor > 75"
        );
        assert_eq!(
            BenevolenceChoice::No.sql_predicate("h.benevolence_factor"),
            "(h.benevolence_factor IS NULL OR h.benevolence_factor <= 75)"
        );
    }
}
