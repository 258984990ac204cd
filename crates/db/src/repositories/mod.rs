//! Repository structs: one per table, static async methods taking the pool.

mod contact_repo;
mod project_repo;
mod session_repo;
mod user_repo;

pub use contact_repo::ContactRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
