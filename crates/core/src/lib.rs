//! Domain types, validation, and the error taxonomy for the portfolio
//! content manager. This crate is pure: no I/O, no database, no HTTP.

pub mod contact;
pub mod error;
pub mod media;
pub mod project;
pub mod types;
