//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use folio_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
///
/// `image_ref` and `video_ref` are opaque media references owned
/// exclusively by this row; replacing or clearing one releases the
/// underlying asset.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub languages: String,
    pub image_ref: Option<String>,
    pub video_ref: Option<String>,
    pub git_url: Option<String>,
    pub live_url: Option<String>,
    pub display_order: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: String,
    pub languages: String,
    pub image_ref: Option<String>,
    pub video_ref: Option<String>,
    pub git_url: Option<String>,
    pub live_url: Option<String>,
    pub display_order: Option<i32>,
}

/// Fully-resolved field set written by an update.
///
/// Unlike a patch DTO, every column value here is final: the handler has
/// already merged the request with the existing row (including the
/// keep/replace/clear decision for asset references), so the repository
/// writes all fields in one statement keyed by id.
#[derive(Debug, Clone)]
pub struct ProjectFields {
    pub name: String,
    pub description: String,
    pub languages: String,
    pub image_ref: Option<String>,
    pub video_ref: Option<String>,
    pub git_url: Option<String>,
    pub live_url: Option<String>,
    pub display_order: Option<i32>,
}
