//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod contact;
pub mod project;
pub mod session;
pub mod user;
