/// Project model and database operations
///
/// A project is owned by exactly one user, carries a member email set, and a
/// management method that decides which board the client renders. Member
/// mutation uses set semantics: adding an existing email is a no-op, and
/// removal strips every occurrence.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE management_method AS ENUM ('Kanban', 'Scrum', 'Waterfall');
///
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     owner_id UUID NOT NULL,
///     title TEXT NOT NULL,
///     description TEXT,
///     management_method management_method NOT NULL DEFAULT 'Kanban',
///     members TEXT[] NOT NULL DEFAULT '{}',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Workflow style selected per project
///
/// Decides which view the client offers (Kanban board, Scrum board, or a
/// Gantt timeline for Waterfall).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "management_method")]
pub enum ManagementMethod {
    Kanban,
    Scrum,
    Waterfall,
}

impl Default for ManagementMethod {
    fn default() -> Self {
        ManagementMethod::Kanban
    }
}

impl ManagementMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManagementMethod::Kanban => "Kanban",
            ManagementMethod::Scrum => "Scrum",
            ManagementMethod::Waterfall => "Waterfall",
        }
    }
}

/// A project record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,

    /// Id of the user who created the project
    pub owner_id: Uuid,

    pub title: String,
    pub description: Option<String>,
    pub management_method: ManagementMethod,

    /// Member email addresses, duplicate-free
    pub members: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a project
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,

    /// Defaults to Kanban when the request omits it
    pub management_method: ManagementMethod,
}

/// Partial update input
///
/// Presence is modeled explicitly: a `None` field was omitted from the
/// request and keeps its stored value; a `Some` field overwrites, including
/// `Some("")` for the description.
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub management_method: Option<ManagementMethod>,
}

impl UpdateProject {
    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.management_method.is_none()
    }
}

impl Project {
    /// Inserts a project with an empty member set.
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (owner_id, title, description, management_method)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, title, description, management_method, members,
                      created_at, updated_at
            "#,
        )
        .bind(data.owner_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.management_method)
        .fetch_one(pool)
        .await
    }

    /// All projects owned by the given user.
    pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, owner_id, title, description, management_method, members,
                   created_at, updated_at
            FROM projects
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            SELECT id, owner_id, title, description, management_method, members,
                   created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Applies a partial update; only present fields are written.
    ///
    /// Returns the updated project, or `None` when the id does not resolve.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        // Same dynamic-query shape as the rest of the partial updates: one
        // placeholder per present field, bound in declaration order.
        let mut query = String::from("UPDATE projects SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            query.push_str(&format!(", description = ${}", bind_count));
        }
        if data.management_method.is_some() {
            bind_count += 1;
            query.push_str(&format!(", management_method = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, owner_id, title, description, management_method, \
             members, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Project>(&query).bind(id);
        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(method) = data.management_method {
            q = q.bind(method);
        }

        q.fetch_optional(pool).await
    }

    /// Deletes the project row.
    ///
    /// Task cleanup is a separate statement (`Task::delete_by_project`); the
    /// two are not wrapped in a transaction, so a crash in between leaves
    /// orphaned tasks. Known gap, kept as-is.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Adds a member email with set semantics: if the email is already in
    /// the array the row is returned unchanged.
    ///
    /// Callers are responsible for checking the email belongs to a real
    /// account first.
    pub async fn add_member(
        pool: &PgPool,
        id: Uuid,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET members = CASE
                    WHEN $2 = ANY(members) THEN members
                    ELSE array_append(members, $2)
                END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, owner_id, title, description, management_method, members,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Removes every occurrence of the email from the member set. Removing
    /// an absent email is a no-op that still returns the project.
    pub async fn remove_member(
        pool: &PgPool,
        id: Uuid,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET members = array_remove(members, $2),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, owner_id, title, description, management_method, members,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(email)
        .fetch_optional(pool)
        .await
    }
}
