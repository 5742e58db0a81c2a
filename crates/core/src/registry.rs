//! Admin registry: one descriptor per entity exposed in the console.
//!
//! The registry is built once at startup and only read afterwards. The
//! console lists it at `/admin/registry`, and action handlers consult it
//! before running so an action that is not registered for an entity is
//! refused even when a route exists.

use std::sync::LazyLock;

use serde::Serialize;

use crate::benevolence::{self, BenevolenceChoice};
use crate::error::CoreError;

pub const ENTITY_HERO: &str = "hero";
pub const ENTITY_HERO_PROXY: &str = "hero_proxy";
pub const ENTITY_VILLAIN: &str = "villain";
pub const ENTITY_CATEGORY: &str = "category";
pub const ENTITY_ORIGIN: &str = "origin";
pub const ENTITY_ALL_ENTITY: &str = "all_entity";

pub const ACTION_EXPORT_CSV: &str = "export_as_csv";
pub const ACTION_MARK_IMMORTAL: &str = "mark_immortal";

/// How a list filter offers its values.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterKind {
    /// `true` / `false`.
    Boolean,
    /// Foreign key id of the named entity.
    Related { entity: &'static str },
    /// Fixed `(value, label)` choices.
    Choices {
        choices: &'static [(&'static str, &'static str)],
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct ListFilter {
    pub parameter: &'static str,
    #[serde(flatten)]
    pub kind: FilterKind,
}

/// Everything the console needs to know about one registered entity.
#[derive(Debug, Clone, Serialize)]
pub struct ModelAdmin {
    pub entity: &'static str,
    /// Path segment under `/api/v1/admin`.
    pub path: &'static str,
    pub list_display: &'static [&'static str],
    pub list_filter: Vec<ListFilter>,
    pub date_hierarchy: Option<&'static str>,
    pub actions: &'static [&'static str],
    /// Custom routes relative to `path`.
    pub extra_routes: &'static [&'static str],
    pub readonly_fields: &'static [&'static str],
    /// Related entities listed inline on the detail view.
    pub inlines: &'static [&'static str],
    pub can_add: bool,
    pub can_change: bool,
    pub can_delete: bool,
}

impl ModelAdmin {
    fn new(entity: &'static str, path: &'static str) -> Self {
        Self {
            entity,
            path,
            list_display: &[],
            list_filter: Vec::new(),
            date_hierarchy: None,
            actions: &[],
            extra_routes: &[],
            readonly_fields: &[],
            inlines: &[],
            can_add: true,
            can_change: true,
            can_delete: true,
        }
    }

    fn read_only(mut self) -> Self {
        self.can_add = false;
        self.can_change = false;
        self.can_delete = false;
        self
    }

    /// Closed taxonomies can be renamed but never grown or pruned.
    fn closed(mut self) -> Self {
        self.can_add = false;
        self.can_delete = false;
        self
    }
}

#[derive(Debug, Default, Serialize)]
pub struct AdminRegistry {
    models: Vec<ModelAdmin>,
}

impl AdminRegistry {
    pub fn register(&mut self, admin: ModelAdmin) {
        self.models.retain(|m| m.entity != admin.entity);
        self.models.push(admin);
    }

    pub fn get(&self, entity: &str) -> Option<&ModelAdmin> {
        self.models.iter().find(|m| m.entity == entity)
    }

    pub fn models(&self) -> &[ModelAdmin] {
        &self.models
    }

    /// Fail with `Forbidden` unless `action` is registered for `entity`.
    pub fn ensure_action(&self, entity: &str, action: &str) -> Result<(), CoreError> {
        let registered = self
            .get(entity)
            .is_some_and(|m| m.actions.contains(&action));
        if registered {
            Ok(())
        } else {
            Err(CoreError::Forbidden(format!(
                "Action '{action}' is not available for {entity}"
            )))
        }
    }
}

static DEFAULT_REGISTRY: LazyLock<AdminRegistry> = LazyLock::new(build_default_registry);

/// The process-wide registry of every entity admin.
pub fn default_registry() -> &'static AdminRegistry {
    &DEFAULT_REGISTRY
}

fn build_default_registry() -> AdminRegistry {
    let mut registry = AdminRegistry::default();

    registry.register(ModelAdmin {
        list_display: &[
            "name",
            "is_immortal",
            "category",
            "origin",
            "is_very_benevolent",
            "children_display",
        ],
        list_filter: vec![
            ListFilter {
                parameter: "is_immortal",
                kind: FilterKind::Boolean,
            },
            ListFilter {
                parameter: "category_id",
                kind: FilterKind::Related {
                    entity: ENTITY_CATEGORY,
                },
            },
            ListFilter {
                parameter: "origin_id",
                kind: FilterKind::Related {
                    entity: ENTITY_ORIGIN,
                },
            },
            ListFilter {
                parameter: benevolence::PARAMETER_NAME,
                kind: FilterKind::Choices {
                    choices: BenevolenceChoice::LOOKUPS,
                },
            },
        ],
        date_hierarchy: Some("added_on"),
        actions: &[ACTION_MARK_IMMORTAL, ACTION_EXPORT_CSV],
        extra_routes: &["immortal", "mortal", "import-csv"],
        readonly_fields: &["headshot", "added_on", "added_by"],
        ..ModelAdmin::new(ENTITY_HERO, "heroes")
    });

    registry.register(ModelAdmin {
        list_display: &["name", "is_immortal", "category", "origin"],
        readonly_fields: &["name", "is_immortal", "category", "origin"],
        ..ModelAdmin::new(ENTITY_HERO_PROXY, "hero-proxies").read_only()
    });

    registry.register(ModelAdmin {
        list_display: &["name", "category", "origin"],
        actions: &[ACTION_EXPORT_CSV],
        extra_routes: &["{id}/make-unique"],
        readonly_fields: &["added_on"],
        ..ModelAdmin::new(ENTITY_VILLAIN, "villains")
    });

    registry.register(ModelAdmin {
        list_display: &["name"],
        inlines: &[ENTITY_VILLAIN],
        extra_routes: &["choices"],
        ..ModelAdmin::new(ENTITY_CATEGORY, "categories").closed()
    });

    registry.register(ModelAdmin {
        list_display: &["name", "hero_count", "villain_count"],
        ..ModelAdmin::new(ENTITY_ORIGIN, "origins").closed()
    });

    registry.register(ModelAdmin {
        list_display: &["id", "name"],
        ..ModelAdmin::new(ENTITY_ALL_ENTITY, "entities").read_only()
    });

    registry
}
