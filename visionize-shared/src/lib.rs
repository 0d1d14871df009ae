//! # Visionize Shared Library
//!
//! Types and business logic shared by the Visionize API server and client:
//!
//! - `models`: database models (users, projects, tasks) and their CRUD
//! - `auth`: password hashing and session token issue/verify
//! - `db`: connection pool and migration runner
//! - `views`: pure board/timeline derivation from task lists

pub mod auth;
pub mod db;
pub mod models;
pub mod views;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
