//! Domain logic for the heroes admin service.
//!
//! Everything here is pure: no database or HTTP access. The `db` crate
//! persists these concepts and the `api` crate exposes them.

pub mod benevolence;
pub mod csv_export;
pub mod csv_import;
pub mod error;
pub mod lineage;
pub mod listing;
pub mod ordering;
pub mod registry;
pub mod roles;
pub mod types;
