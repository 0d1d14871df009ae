/// Project endpoints
///
/// - `GET    /api/projects`: the caller's projects
/// - `POST   /api/projects`: create
/// - `GET    /api/projects/:id`
/// - `PUT    /api/projects/:id`: partial update
/// - `DELETE /api/projects/:id`: cascades to the project's tasks
/// - `POST   /api/projects/:id/members`: add member by email
/// - `DELETE /api/projects/:id/members/:member_id`: remove member
///
/// All routes sit behind the bearer middleware. Listing is scoped to the
/// caller's ownership; the id-addressed routes are not ownership-checked.

use crate::{
    app::{AppState, AuthContext},
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use visionize_shared::models::{
    project::{CreateProject, ManagementMethod, Project, UpdateProject},
    task::Task,
    user::User,
};

/// Create request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub management_method: Option<ManagementMethod>,
}

/// Update request body: omitted fields keep their stored value
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub management_method: Option<ManagementMethod>,
}

/// Member add request body
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub email: Option<String>,
}

/// Delete acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Lists projects owned by the caller.
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<axum::Json<Vec<Project>>> {
    let projects = Project::list_by_owner(&state.db, auth.user_id).await?;
    Ok(axum::Json(projects))
}

/// Creates a project with the caller as owner and an empty member set.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, axum::Json<Project>)> {
    let title = req
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Title is required".to_string()))?;

    let project = Project::create(
        &state.db,
        CreateProject {
            owner_id: auth.user_id,
            title,
            description: req.description,
            management_method: req.management_method.unwrap_or_default(),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, axum::Json(project)))
}

/// Fetches a single project by id.
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<axum::Json<Project>> {
    let project = Project::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(axum::Json(project))
}

/// Applies a partial update.
///
/// Only fields present in the body are written; an explicit empty string
/// overwrites. A management method outside the allowed set never reaches
/// this handler: deserialization rejects it with a 400.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<axum::Json<Project>> {
    let project = Project::update(
        &state.db,
        id,
        UpdateProject {
            title: req.title,
            description: req.description,
            management_method: req.management_method,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(axum::Json(project))
}

/// Deletes a project, then every task referencing it.
///
/// The two deletes are separate statements, project first; there is no
/// transaction around them. A crash in between orphans the tasks.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<axum::Json<OkResponse>> {
    Project::delete(&state.db, id).await?;
    let removed = Task::delete_by_project(&state.db, id).await?;
    tracing::debug!(project_id = %id, tasks_removed = removed, "Project deleted");

    Ok(axum::Json(OkResponse { ok: true }))
}

/// Adds a member email to the project.
///
/// The email must belong to an existing account; adding an email that is
/// already a member leaves the set unchanged.
pub async fn add_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddMemberRequest>,
) -> ApiResult<axum::Json<Project>> {
    let email = req
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Email is required".to_string()))?;

    if User::find_by_email(&state.db, &email).await?.is_none() {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let project = Project::add_member(&state.db, id, &email)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(axum::Json(project))
}

/// Removes a member email from the project. Removing an absent email
/// succeeds and returns the project unchanged.
pub async fn remove_member(
    State(state): State<AppState>,
    Path((id, member_id)): Path<(Uuid, String)>,
) -> ApiResult<axum::Json<Project>> {
    let project = Project::remove_member(&state.db, id, &member_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    Ok(axum::Json(project))
}
