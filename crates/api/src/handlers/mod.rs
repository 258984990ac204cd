//! HTTP handlers, one module per resource.

pub mod auth;
pub mod contact;
pub mod media;
pub mod project;
pub mod users;
