//! # nimbus-auth
//!
//! Authentication primitives for Nimbus: stateless JWT bearer tokens and
//! Argon2id password hashing with policy validation.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
