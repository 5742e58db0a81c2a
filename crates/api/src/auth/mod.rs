//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation.
//!
//! Tokens are issued by the identity provider that fronts the console; this
//! service only validates them. [`jwt::generate_access_token`] exists for
//! operator tooling and tests.

pub mod jwt;
