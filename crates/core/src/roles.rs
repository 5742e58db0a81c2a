//! Well-known role name constants.
//!
//! These must match the `role` values the identity issuer writes into
//! access-token claims and the values stored in `users.role`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";
