/// Typed HTTP client for the Visionize API
///
/// Wraps reqwest with the API's request and response shapes, attaches the
/// session bearer token to protected calls, and surfaces the server's
/// `{ "error": "..." }` body as a typed error. Sign-in writes the session
/// through the [`SessionCache`]; later constructions pick it up from disk,
/// so a client restart stays signed in until the token expires.

use crate::session::{Session, SessionCache, SessionError};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use uuid::Uuid;
use visionize_shared::models::{
    project::{ManagementMethod, Project},
    task::{Task, TaskKind, TaskPriority, TaskStatus},
    user::UserProfile,
};

/// Error type for API client operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure: connection refused, DNS, timeouts
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// Session persistence failed
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A protected call was made with no stored session
    #[error("Not signed in")]
    NotSignedIn,
}

/// New account details for sign-up
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub email: String,
    pub password: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

/// Project fields for create and partial update
///
/// For updates, omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_method: Option<ManagementMethod>,
}

/// Full task shape sent on create and update
///
/// The server treats task update as replacement, so drafts always carry the
/// whole record.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub status: TaskStatus,
    pub progress: i32,
    pub priority: TaskPriority,

    #[serde(rename = "type")]
    pub kind: TaskKind,

    pub assignee: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl TaskDraft {
    /// Draft pre-filled from an existing task, ready to edit and send back.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            progress: task.progress,
            priority: task.priority,
            kind: task.kind,
            assignee: task.assignee.clone(),
            start_date: task.start_date.clone(),
            end_date: task.end_date.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct SigninResponse {
    token: String,
    user: UserProfile,
}

#[derive(Debug, Serialize)]
struct SigninRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct AddMemberRequest<'a> {
    email: &'a str,
}

/// API client with a file-backed session
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    cache: SessionCache,
    session: RwLock<Option<Session>>,
}

impl ApiClient {
    /// Creates a client against `base_url`, restoring any session stored at
    /// `session_path`.
    pub fn new(
        base_url: impl Into<String>,
        session_path: impl Into<std::path::PathBuf>,
    ) -> Result<Self, ClientError> {
        let cache = SessionCache::new(session_path);
        let session = cache.load()?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache,
            session: RwLock::new(session),
        })
    }

    /// The profile of the signed-in user, if any.
    pub fn current_user(&self) -> Option<UserProfile> {
        self.session
            .read()
            .ok()
            .and_then(|s| s.as_ref().map(|s| s.user.clone()))
    }

    pub fn is_signed_in(&self) -> bool {
        self.session
            .read()
            .map(|s| s.is_some())
            .unwrap_or(false)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn bearer(&self) -> Result<String, ClientError> {
        self.session
            .read()
            .ok()
            .and_then(|s| s.as_ref().map(|s| s.token.clone()))
            .ok_or(ClientError::NotSignedIn)
    }

    // -- authentication ----------------------------------------------------

    /// Registers a new account, then signs in with the same credentials.
    pub async fn sign_up(&self, account: NewAccount) -> Result<UserProfile, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/signup"))
            .json(&account)
            .send()
            .await?;
        let _: serde_json::Value = parse(response).await?;

        self.sign_in(&account.email, &account.password).await
    }

    /// Exchanges credentials for a session and persists it.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/signin"))
            .json(&SigninRequest { email, password })
            .send()
            .await?;
        let signin: SigninResponse = parse(response).await?;

        let session = Session {
            token: signin.token,
            user: signin.user.clone(),
        };
        self.cache.save(&session)?;
        if let Ok(mut guard) = self.session.write() {
            *guard = Some(session);
        }

        Ok(signin.user)
    }

    /// Forgets the session, in memory and on disk.
    pub fn sign_out(&self) -> Result<(), ClientError> {
        if let Ok(mut guard) = self.session.write() {
            *guard = None;
        }
        self.cache.clear()?;
        Ok(())
    }

    // -- projects ----------------------------------------------------------

    /// Lists the caller's projects.
    pub async fn projects(&self) -> Result<Vec<Project>, ClientError> {
        let response = self
            .http
            .get(self.url("/projects"))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        parse(response).await
    }

    pub async fn create_project(&self, draft: &ProjectDraft) -> Result<Project, ClientError> {
        let response = self
            .http
            .post(self.url("/projects"))
            .bearer_auth(self.bearer()?)
            .json(draft)
            .send()
            .await?;
        parse(response).await
    }

    pub async fn project(&self, id: Uuid) -> Result<Project, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/projects/{}", id)))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        parse(response).await
    }

    /// Partially updates a project; fields absent from the draft keep their
    /// stored value.
    pub async fn update_project(
        &self,
        id: Uuid,
        draft: &ProjectDraft,
    ) -> Result<Project, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/projects/{}", id)))
            .bearer_auth(self.bearer()?)
            .json(draft)
            .send()
            .await?;
        parse(response).await
    }

    /// Deletes a project and its tasks.
    pub async fn delete_project(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/projects/{}", id)))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        let _: serde_json::Value = parse(response).await?;
        Ok(())
    }

    /// Adds a member by email; the email must belong to an existing account.
    pub async fn add_member(&self, id: Uuid, email: &str) -> Result<Project, ClientError> {
        let response = self
            .http
            .post(self.url(&format!("/projects/{}/members", id)))
            .bearer_auth(self.bearer()?)
            .json(&AddMemberRequest { email })
            .send()
            .await?;
        parse(response).await
    }

    pub async fn remove_member(&self, id: Uuid, email: &str) -> Result<Project, ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/projects/{}/members/{}", id, email)))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        parse(response).await
    }

    // -- tasks -------------------------------------------------------------

    pub async fn tasks(&self, project_id: Uuid) -> Result<Vec<Task>, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/projects/{}/tasks", project_id)))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        parse(response).await
    }

    pub async fn create_task(
        &self,
        project_id: Uuid,
        draft: &TaskDraft,
    ) -> Result<Task, ClientError> {
        let response = self
            .http
            .post(self.url(&format!("/projects/{}/tasks", project_id)))
            .bearer_auth(self.bearer()?)
            .json(draft)
            .send()
            .await?;
        parse(response).await
    }

    /// Replaces a task with the draft's contents.
    pub async fn update_task(&self, task_id: Uuid, draft: &TaskDraft) -> Result<Task, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/tasks/{}", task_id)))
            .bearer_auth(self.bearer()?)
            .json(draft)
            .send()
            .await?;
        parse(response).await
    }

    pub async fn delete_task(&self, task_id: Uuid) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/tasks/{}", task_id)))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        let _: serde_json::Value = parse(response).await?;
        Ok(())
    }
}

/// Decodes a response, mapping non-success statuses to [`ClientError::Api`]
/// with the server's error string when one is present.
async fn parse<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };

    Err(ClientError::Api { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_wire_shape() {
        let account = NewAccount {
            email: "ada@example.com".to_string(),
            password: "secret123".to_string(),
            first_name: Some("Ada".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["firstName"], "Ada");
        assert!(json.get("lastName").is_none());
        assert!(json.get("birthDate").is_none());
    }

    #[test]
    fn test_project_draft_omits_absent_fields() {
        let draft = ProjectDraft {
            title: Some("Apollo".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["title"], "Apollo");
        assert!(json.get("description").is_none());
        assert!(json.get("managementMethod").is_none());
    }

    #[test]
    fn test_task_draft_wire_shape() {
        let draft = TaskDraft {
            title: "Ship it".to_string(),
            kind: TaskKind::Blocking,
            progress: 40,
            ..Default::default()
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["title"], "Ship it");
        assert_eq!(json["type"], "Blocking");
        assert!(json.get("kind").is_none());
        assert_eq!(json["status"], "Not Started");
        assert_eq!(json["progress"], 40);
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let path = std::env::temp_dir().join(format!("visionize-{}.json", Uuid::new_v4()));
        let client = ApiClient::new("http://localhost:5001/", &path).unwrap();
        assert_eq!(client.url("/projects"), "http://localhost:5001/api/projects");
        assert!(!client.is_signed_in());
    }

    #[test]
    fn test_bearer_requires_session() {
        let path = std::env::temp_dir().join(format!("visionize-{}.json", Uuid::new_v4()));
        let client = ApiClient::new("http://localhost:5001", &path).unwrap();
        assert!(matches!(client.bearer(), Err(ClientError::NotSignedIn)));
        assert!(client.current_user().is_none());
    }
}
