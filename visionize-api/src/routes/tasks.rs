/// Task endpoints
///
/// - `GET    /api/projects/:project_id/tasks`
/// - `POST   /api/projects/:project_id/tasks`
/// - `PUT    /api/tasks/:task_id`
/// - `DELETE /api/tasks/:task_id`
///
/// Create and update share one body shape. Update is whole-record
/// replacement: every field the body omits is reset to its default, unlike
/// the merge semantics of project update. The client always sends the full
/// task back, so this matches real traffic; the asymmetry is intentional
/// and pinned by tests.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use visionize_shared::models::task::{Task, TaskInput, TaskKind, TaskPriority, TaskStatus};

/// Task body for create and update
///
/// `progress` is accepted as a number or a numeric string; anything else
/// coerces to 0. The rest of the enumerated fields default when omitted and
/// reject unknown values at deserialization time.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBody {
    pub title: Option<String>,
    pub description: Option<String>,

    #[serde(default)]
    pub status: Option<TaskStatus>,

    #[serde(default)]
    pub progress: Option<JsonValue>,

    #[serde(default)]
    pub priority: Option<TaskPriority>,

    #[serde(rename = "type", default)]
    pub kind: Option<TaskKind>,

    pub assignee: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl TaskBody {
    /// Converts the wire body into a full task input, applying defaults.
    ///
    /// Fails only when the title is missing or blank.
    fn into_input(self) -> Result<TaskInput, ApiError> {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("Title is required".to_string()))?;

        Ok(TaskInput {
            title,
            description: self.description,
            status: self.status.unwrap_or_default(),
            progress: coerce_progress(self.progress.as_ref()),
            priority: self.priority.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            assignee: self.assignee.unwrap_or_default(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
        .clamped())
    }
}

/// Coerces a JSON value into a progress percentage.
///
/// Numbers are rounded, numeric strings parsed; null, absent, or
/// non-numeric values become 0. Clamping to 0..=100 happens afterwards.
fn coerce_progress(value: Option<&JsonValue>) -> i32 {
    match value {
        Some(JsonValue::Number(n)) => n.as_f64().map(|f| f.round() as i32).unwrap_or(0),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().map(|f| f.round() as i32).unwrap_or(0),
        _ => 0,
    }
}

/// Delete acknowledgement
#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

/// Lists every task of a project.
pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<axum::Json<Vec<Task>>> {
    let tasks = Task::list_by_project(&state.db, project_id).await?;
    Ok(axum::Json(tasks))
}

/// Creates a task under a project.
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(body): Json<TaskBody>,
) -> ApiResult<(StatusCode, axum::Json<Task>)> {
    let task = Task::create(&state.db, project_id, body.into_input()?).await?;
    Ok((StatusCode::CREATED, axum::Json(task)))
}

/// Replaces a task's fields with the given body.
pub async fn update(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(body): Json<TaskBody>,
) -> ApiResult<axum::Json<Task>> {
    let task = Task::update(&state.db, task_id, body.into_input()?)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(axum::Json(task))
}

/// Deletes a task.
pub async fn delete(
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<axum::Json<OkResponse>> {
    Task::delete(&state.db, task_id).await?;
    Ok(axum::Json(OkResponse { ok: true }))
}
