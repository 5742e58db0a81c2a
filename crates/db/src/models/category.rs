//! Category model and DTOs.

use heroes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Category {
    /// Label used wherever a category is offered as a choice.
    pub fn choice_label(&self) -> String {
        format!("Category: {}", self.name)
    }
}

/// One entry of the category choice list.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryChoice {
    pub id: DbId,
    pub label: String,
}

impl From<&Category> for CategoryChoice {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            label: category.choice_label(),
        }
    }
}

/// Categories can only be renamed.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategory {
    pub name: String,
}
