//! Route definitions for the `/media` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes mounted at `/media`.
///
/// ```text
/// POST /        -> upload
/// POST /sweep   -> orphan sweep
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(media::upload))
        .route("/sweep", post(media::sweep))
}
