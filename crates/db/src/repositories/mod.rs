//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Helpers that must run inside
//! a caller's transaction take `&mut PgConnection` instead.

pub mod all_entity_repo;
pub mod category_repo;
pub mod hero_proxy_repo;
pub mod hero_repo;
pub mod origin_repo;
pub mod user_repo;
pub mod villain_repo;

pub use all_entity_repo::AllEntityRepo;
pub use category_repo::CategoryRepo;
pub use hero_proxy_repo::HeroProxyRepo;
pub use hero_repo::{HeroRepo, HeroSaveError};
pub use origin_repo::OriginRepo;
pub use user_repo::UserRepo;
pub use villain_repo::VillainRepo;
