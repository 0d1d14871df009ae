//! # Visionize Client Library
//!
//! Consuming side of the Visionize API: a durable session cache (the
//! signed-in state on disk) and a typed HTTP client that attaches the
//! bearer token to protected calls.
//!
//! ## Modules
//!
//! - `client`: typed API client over reqwest
//! - `session`: file-backed session persistence

pub mod client;
pub mod session;

pub use client::{ApiClient, ClientError, NewAccount, ProjectDraft, TaskDraft};
pub use session::{Session, SessionCache, SessionError};
