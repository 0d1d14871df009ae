/// API route handlers, one module per resource
///
/// - `health`: readiness probe
/// - `auth`: signup and signin
/// - `projects`: project CRUD and member management
/// - `tasks`: task CRUD scoped to a project

pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;
