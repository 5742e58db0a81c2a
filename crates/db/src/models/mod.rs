//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and updates where the entity is writable

pub mod all_entity;
pub mod category;
pub mod hero;
pub mod origin;
pub mod user;
pub mod villain;
