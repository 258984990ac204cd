//! Handlers for the `/projects` resource.
//!
//! This is where the two core concerns meet: the display-order uniqueness
//! invariant (checked before any write, excluding the row itself on
//! update) and the asset lifecycle (an asset reference is owned by exactly
//! one row; replacing, clearing, or deleting releases the old asset, and a
//! failed release never blocks the row mutation).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use folio_core::error::CoreError;
use folio_core::project::{validate_required_fields, RequiredFields};
use folio_core::types::DbId;
use folio_db::models::project::{CreateProject, Project, ProjectFields};
use folio_db::repositories::ProjectRepo;
use folio_media::release_or_log;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /projects/{id}`.
///
/// Asset references follow keep/replace/clear semantics: a present
/// `image_ref` replaces the current one, `remove_image` clears it, and
/// neither means keep. Same for video.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: String,
    pub description: String,
    pub languages: String,
    pub git_url: Option<String>,
    pub live_url: Option<String>,
    pub display_order: Option<i32>,
    pub image_ref: Option<String>,
    #[serde(default)]
    pub remove_image: bool,
    pub video_ref: Option<String>,
    #[serde(default)]
    pub remove_video: bool,
}

/// GET /api/v1/projects (public)
///
/// Sorted ascending by display order; unordered projects come last.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list_ordered(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id} (public)
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_required_fields(RequiredFields {
        name: &input.name,
        description: &input.description,
        languages: &input.languages,
    })?;
    if let Some(order) = input.display_order {
        ensure_order_free(&state, order, None).await?;
    }

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(
        project_id = project.id,
        user_id = auth_user.user_id,
        "Project created"
    );
    Ok((StatusCode::CREATED, Json(project)))
}

/// PUT /api/v1/projects/{id}
///
/// All checks run before any mutation; superseded assets are released just
/// before the single-statement row rewrite, and a release failure is
/// logged rather than propagated.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectRequest>,
) -> AppResult<Json<Project>> {
    let existing = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    if let Some(order) = input.display_order {
        // Excluding the row itself: writing a project's current order back
        // is never a conflict.
        ensure_order_free(&state, order, Some(id)).await?;
    }
    validate_required_fields(RequiredFields {
        name: &input.name,
        description: &input.description,
        languages: &input.languages,
    })?;

    let (image_ref, superseded_image) =
        effective_ref(existing.image_ref, input.image_ref, input.remove_image);
    let (video_ref, superseded_video) =
        effective_ref(existing.video_ref, input.video_ref, input.remove_video);

    for reference in [&superseded_image, &superseded_video].into_iter().flatten() {
        release_or_log(state.media.as_ref(), reference).await;
    }

    let fields = ProjectFields {
        name: input.name,
        description: input.description,
        languages: input.languages,
        image_ref,
        video_ref,
        git_url: input.git_url,
        live_url: input.live_url,
        display_order: input.display_order,
    };
    let project = ProjectRepo::update(&state.pool, id, &fields)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    tracing::info!(
        project_id = id,
        user_id = auth_user.user_id,
        "Project updated"
    );
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Idempotent: deleting a missing project is a 204 no-op. Owned assets are
/// released first (best-effort); the row delete proceeds regardless.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if let Some(existing) = ProjectRepo::find_by_id(&state.pool, id).await? {
        for reference in [&existing.image_ref, &existing.video_ref]
            .into_iter()
            .flatten()
        {
            release_or_log(state.media.as_ref(), reference).await;
        }
        ProjectRepo::delete(&state.pool, id).await?;
        tracing::info!(
            project_id = id,
            user_id = auth_user.user_id,
            "Project deleted"
        );
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Fail with `DuplicateOrder` if another project already holds `order`.
async fn ensure_order_free(
    state: &AppState,
    order: i32,
    exclude: Option<DbId>,
) -> AppResult<()> {
    if ProjectRepo::find_order_conflict(&state.pool, order, exclude)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::DuplicateOrder { order }));
    }
    Ok(())
}

/// Merge the current asset reference with the request, returning
/// `(effective, superseded)`.
///
/// - replacement present: the old reference (if different) is superseded
/// - remove flag set: the old reference is superseded, effective is None
/// - neither: keep the old reference
fn effective_ref(
    current: Option<String>,
    replacement: Option<String>,
    remove: bool,
) -> (Option<String>, Option<String>) {
    match (replacement, remove) {
        (Some(new), _) => {
            let superseded = current.filter(|old| *old != new);
            (Some(new), superseded)
        }
        (None, true) => (None, current),
        (None, false) => (current, None),
    }
}
