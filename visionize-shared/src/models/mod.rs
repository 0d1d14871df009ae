/// Database models
///
/// One module per collection, each owning its CRUD surface:
///
/// - `user`: accounts and credential lookup
/// - `project`: projects with owner, members, and management method
/// - `task`: tasks scoped to a project
///
/// # Example
///
/// ```no_run
/// use visionize_shared::models::user::User;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// if let Some(user) = User::find_by_email(&pool, "ada@example.com").await? {
///     println!("found {}", user.id);
/// }
/// # Ok(())
/// # }
/// ```

pub mod project;
pub mod task;
pub mod user;
