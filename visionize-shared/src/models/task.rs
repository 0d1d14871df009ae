/// Task model and database operations
///
/// Tasks belong to exactly one project. Unlike project updates, a task
/// update is a deliberate whole-record replacement: the caller supplies the
/// full task shape and every column is written. The client edits tasks by
/// sending back the complete object, so replacement matches actual use.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     project_id UUID NOT NULL,
///     title TEXT NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'Not Started',
///     progress INTEGER NOT NULL DEFAULT 0 CHECK (progress BETWEEN 0 AND 100),
///     priority task_priority NOT NULL DEFAULT 'Normal',
///     kind task_kind NOT NULL DEFAULT 'Normal',
///     assignee TEXT NOT NULL DEFAULT '',
///     start_date TEXT,
///     end_date TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// There is no foreign key from `tasks.project_id` to `projects`: project
/// deletion cascades through two explicit deletes, project row first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Workflow status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    #[sqlx(rename = "Not Started")]
    #[serde(rename = "Not Started")]
    NotStarted,

    #[sqlx(rename = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,

    Completed,
    Cancelled,
    Reported,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::NotStarted
    }
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Cancelled => "Cancelled",
            TaskStatus::Reported => "Reported",
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority")]
pub enum TaskPriority {
    Low,
    Normal,
    High,
    Critical,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Normal
    }
}

/// Task classification ("type" on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_kind")]
pub enum TaskKind {
    Normal,
    Critical,
    Blocking,
    Enhancement,
}

impl Default for TaskKind {
    fn default() -> Self {
        TaskKind::Normal
    }
}

/// A task record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,

    /// Parent project reference
    pub project_id: Uuid,

    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,

    /// Completion percentage, kept in 0..=100
    pub progress: i32,

    pub priority: TaskPriority,

    #[serde(rename = "type")]
    pub kind: TaskKind,

    /// Email of the responsible team member, empty when unassigned
    pub assignee: String,

    /// ISO date strings, optional on both ends
    pub start_date: Option<String>,
    pub end_date: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full task shape used for both create and update
///
/// Update is replacement, so the same input type serves both operations;
/// defaults for omitted fields are applied before this struct is built.
#[derive(Debug, Clone, Default)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub progress: i32,
    pub priority: TaskPriority,
    pub kind: TaskKind,
    pub assignee: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl TaskInput {
    /// Clamps progress into 0..=100. The check constraint would reject
    /// out-of-range values; clamping keeps the API lenient instead.
    pub fn clamped(mut self) -> Self {
        self.progress = self.progress.clamp(0, 100);
        self
    }
}

impl Task {
    /// Inserts a task under the given project.
    pub async fn create(
        pool: &PgPool,
        project_id: Uuid,
        input: TaskInput,
    ) -> Result<Self, sqlx::Error> {
        let input = input.clamped();
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (project_id, title, description, status, progress, priority,
                               kind, assignee, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, project_id, title, description, status, progress, priority, kind,
                      assignee, start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(project_id)
        .bind(input.title)
        .bind(input.description)
        .bind(input.status)
        .bind(input.progress)
        .bind(input.priority)
        .bind(input.kind)
        .bind(input.assignee)
        .bind(input.start_date)
        .bind(input.end_date)
        .fetch_one(pool)
        .await
    }

    /// All tasks belonging to the project.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project_id, title, description, status, progress, priority, kind,
                   assignee, start_date, end_date, created_at, updated_at
            FROM tasks
            WHERE project_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, project_id, title, description, status, progress, priority, kind,
                   assignee, start_date, end_date, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Replaces every mutable column of the task with the given input.
    ///
    /// Returns the updated task, or `None` when the id does not resolve.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        input: TaskInput,
    ) -> Result<Option<Self>, sqlx::Error> {
        let input = input.clamped();
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, status = $4, progress = $5, priority = $6,
                kind = $7, assignee = $8, start_date = $9, end_date = $10, updated_at = NOW()
            WHERE id = $1
            RETURNING id, project_id, title, description, status, progress, priority, kind,
                      assignee, start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(input.title)
        .bind(input.description)
        .bind(input.status)
        .bind(input.progress)
        .bind(input.priority)
        .bind(input.kind)
        .bind(input.assignee)
        .bind(input.start_date)
        .bind(input.end_date)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes every task referencing the project. Second half of the
    /// project cascade delete.
    pub async fn delete_by_project(pool: &PgPool, project_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE project_id = $1")
            .bind(project_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
