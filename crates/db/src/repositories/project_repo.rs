//! Repository for the `projects` table.

use sqlx::PgPool;

use folio_core::types::DbId;

use crate::models::project::{CreateProject, Project, ProjectFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, languages, image_ref, video_ref, \
                       git_url, live_url, display_order, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// The caller has already validated required fields and checked the
    /// display-order invariant; the partial unique index backstops the
    /// latter.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                 (name, description, languages, image_ref, video_ref,
                  git_url, live_url, display_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.languages)
            .bind(&input.image_ref)
            .bind(&input.video_ref)
            .bind(&input.git_url)
            .bind(&input.live_url)
            .bind(input.display_order)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects sorted ascending by `display_order`, with
    /// unordered rows (NULL) last, newest first among themselves.
    pub async fn list_ordered(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             ORDER BY display_order ASC NULLS LAST, created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Find the id of a project already holding `display_order`, excluding
    /// `exclude` when given (so an update never conflicts with itself).
    ///
    /// Advisory: two concurrent writers can both pass this check; the
    /// partial unique index is what actually serializes them.
    pub async fn find_order_conflict(
        pool: &PgPool,
        display_order: i32,
        exclude: Option<DbId>,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM projects
             WHERE display_order = $1 AND ($2::BIGINT IS NULL OR id != $2)",
        )
        .bind(display_order)
        .bind(exclude)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(id,)| id))
    }

    /// Rewrite every mutable column of a project in one statement keyed by
    /// id. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        fields: &ProjectFields,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = $2,
                description = $3,
                languages = $4,
                image_ref = $5,
                video_ref = $6,
                git_url = $7,
                live_url = $8,
                display_order = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.description)
            .bind(&fields.languages)
            .bind(&fields.image_ref)
            .bind(&fields.video_ref)
            .bind(&fields.git_url)
            .bind(&fields.live_url)
            .bind(fields.display_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID. Returns `true` if a row was removed; a
    /// missing row is not an error, so deletion stays idempotent.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Every asset reference currently held by any project row. Input to
    /// the orphan sweep: anything the backend holds beyond this set is
    /// releasable.
    pub async fn all_asset_refs(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(Option<String>, Option<String>)> =
            sqlx::query_as("SELECT image_ref, video_ref FROM projects")
                .fetch_all(pool)
                .await?;
        Ok(rows
            .into_iter()
            .flat_map(|(image, video)| [image, video])
            .flatten()
            .collect())
    }
}
