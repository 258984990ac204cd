pub mod auth;
pub mod contact;
pub mod health;
pub mod media;
pub mod project;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login              login (public)
/// /auth/logout             logout (public, idempotent)
///
/// /projects                list (public), create (auth)
/// /projects/{id}           get (public), update, delete (auth)
///
/// /contact                 submit (public), list (auth)
///
/// /media                   upload (auth)
/// /media/sweep             orphan sweep (auth)
///
/// /users                   list, create (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/contact", contact::router())
        .nest("/media", media::router())
        .nest("/users", users::router())
}
