/// Authentication primitives for Visionize
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: signed session tokens (issue + verify)
///
/// Passwords are one-way hashed before they ever reach storage; session
/// state lives entirely inside the signed token, so the server keeps no
/// session table.

pub mod jwt;
pub mod password;
