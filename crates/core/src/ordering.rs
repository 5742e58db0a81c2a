//! Sort keys for the origin list and its computed count columns.
//!
//! The `ordering` parameter names a column, optionally prefixed with `-`
//! for descending order. Ties always fall back to `name`, then `id`, so
//! pages never shuffle between requests.

use serde::Serialize;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginSortKey {
    Name,
    HeroCount,
    VillainCount,
}

impl OriginSortKey {
    pub const ALL: &'static [OriginSortKey] = &[Self::Name, Self::HeroCount, Self::VillainCount];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::HeroCount => "hero_count",
            Self::VillainCount => "villain_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginOrdering {
    pub key: OriginSortKey,
    pub descending: bool,
}

impl Default for OriginOrdering {
    fn default() -> Self {
        Self {
            key: OriginSortKey::Name,
            descending: false,
        }
    }
}

impl OriginOrdering {
    /// Parse `name`, `-hero_count`, etc. `None` yields the default (name
    /// ascending).
    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::default());
        };

        let (descending, column) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let key = OriginSortKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == column)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid ordering '{raw}'. Must be one of: name, hero_count, villain_count \
                     (prefix with '-' for descending)"
                ))
            })?;

        Ok(Self { key, descending })
    }

    /// `ORDER BY` body for the grouped origin query.
    ///
    /// Column names are fixed identifiers from [`OriginSortKey`], never user
    /// text, so the result is safe to interpolate.
    pub fn order_by_clause(self) -> String {
        let direction = if self.descending { "DESC" } else { "ASC" };
        match self.key {
            OriginSortKey::Name => format!("o.name {direction}, o.id {direction}"),
            key => format!("{} {direction}, o.name ASC, o.id ASC", key.as_str()),
        }
    }
}
