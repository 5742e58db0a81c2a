//! Request handlers for the admin console.
//!
//! Each submodule provides the async handlers for one registered entity.
//! Handlers delegate to the corresponding repository in `heroes_db` and map
//! errors via [`AppError`](crate::error::AppError).

pub mod categories;
pub mod entities;
pub mod export;
pub mod hero_proxy;
pub mod heroes;
pub mod origins;
pub mod registry;
pub mod villains;
