//! Hero entity model, its read-only proxy projection, and DTOs.

use heroes_core::benevolence::{self, BenevolenceChoice};
use heroes_core::csv_export::{text_bool, text_opt, text_timestamp, CsvRecord};
use heroes_core::error::CoreError;
use heroes_core::lineage;
use heroes_core::listing::DateDrilldown;
use heroes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A hero row joined with the display names of its foreign keys.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Hero {
    pub id: DbId,
    pub name: String,
    pub is_immortal: bool,
    pub category_id: Option<DbId>,
    pub category: Option<String>,
    pub origin_id: DbId,
    pub origin: String,
    pub benevolence_factor: Option<i32>,
    pub added_on: Timestamp,
    pub added_by: Option<DbId>,
    pub added_by_username: Option<String>,
    pub headshot: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Hero {
    /// Unset factors are never very benevolent.
    pub fn is_very_benevolent(&self) -> bool {
        self.benevolence_factor
            .is_some_and(benevolence::is_very_benevolent)
    }
}

impl CsvRecord for Hero {
    const ENTITY: &'static str = "hero";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "is_immortal",
        "category",
        "origin",
        "benevolence_factor",
        "added_on",
        "added_by",
        "headshot",
    ];

    fn csv_values(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            text_bool(self.is_immortal),
            text_opt(self.category.as_deref()),
            self.origin.clone(),
            text_opt(self.benevolence_factor),
            text_timestamp(&self.added_on),
            text_opt(self.added_by_username.as_deref()),
            text_opt(self.headshot.as_deref()),
        ]
    }
}

/// A child link, carrying the parent so one query can serve a whole page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HeroChild {
    #[serde(skip)]
    pub parent_id: DbId,
    pub id: DbId,
    pub name: String,
}

/// One row of the hero list view.
#[derive(Debug, Clone, Serialize)]
pub struct HeroListItem {
    #[serde(flatten)]
    pub hero: Hero,
    pub is_very_benevolent: bool,
    pub children_display: String,
}

impl HeroListItem {
    pub fn new(hero: Hero, children: &[&HeroChild]) -> Self {
        let names: Vec<&str> = children.iter().map(|c| c.name.as_str()).collect();
        Self {
            is_very_benevolent: hero.is_very_benevolent(),
            children_display: lineage::children_display(&names),
            hero,
        }
    }
}

/// Hero detail view: the row plus its children.
#[derive(Debug, Clone, Serialize)]
pub struct HeroDetail {
    #[serde(flatten)]
    pub hero: Hero,
    pub is_very_benevolent: bool,
    pub children: Vec<HeroChild>,
}

/// The hero change form, used for both create and update.
///
/// `category_name` is free text resolved to a category on save; it is
/// required even though `category_id` is nullable in storage.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HeroForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Defaults to `true` on create; unchanged on update when omitted.
    pub is_immortal: Option<bool>,
    #[serde(default)]
    #[validate(length(min = 1, message = "category_name is required"))]
    pub category_name: String,
    pub origin_id: DbId,
    pub benevolence_factor: Option<i32>,
    pub headshot: Option<String>,
    /// Replaces the child set when present.
    pub children: Option<Vec<DbId>>,
}

impl HeroForm {
    /// Trim free-text fields and run field validation.
    pub fn clean(mut self) -> Result<Self, CoreError> {
        self.name = self.name.trim().to_string();
        self.category_name = self.category_name.trim().to_string();
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        self.children = self
            .children
            .map(|ids| lineage::normalize_children(&ids));
        Ok(self)
    }
}

/// A hero parsed from an import file, with names resolved to ids where the
/// row requires an existing record.
#[derive(Debug, Clone)]
pub struct ImportHero {
    pub name: String,
    pub origin_id: DbId,
    /// Resolved with get-or-create inside the import transaction.
    pub category_name: Option<String>,
    pub is_immortal: bool,
    pub benevolence_factor: Option<i32>,
}

/// Hero list filters. All `None` means the unfiltered list.
#[derive(Debug, Clone, Default)]
pub struct HeroFilter {
    pub is_immortal: Option<bool>,
    pub category_id: Option<DbId>,
    pub origin_id: Option<DbId>,
    pub benevolence: Option<BenevolenceChoice>,
    pub added: DateDrilldown,
}

/// Read-only projection over `heroes` exposing a reduced field set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HeroProxy {
    pub id: DbId,
    pub name: String,
    pub is_immortal: bool,
    pub category: Option<String>,
    pub origin: String,
}
