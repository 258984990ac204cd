//! Credential and session primitives: argon2id password hashing and
//! opaque session tokens.

pub mod password;
pub mod token;
