/// Session token issue and verification
///
/// Sessions are signed HS256 tokens carrying the subject's id, email, and an
/// absolute expiry. Nothing is stored server-side: the bearer holds the
/// token, the server only checks signature and expiry on each request.
///
/// Default validity is 12 hours from issuance. Expiry is part of the signed
/// payload and is enforced during `decode`, so a stale token can never
/// verify silently.
///
/// # Example
///
/// ```
/// use visionize_shared::auth::jwt::{issue_token, verify_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-secret-of-at-least-32-bytes-long!";
/// let user_id = Uuid::new_v4();
///
/// let token = issue_token(&Claims::new(user_id, "ada@example.com"), secret)?;
/// let claims = verify_token(&token, secret)?;
/// assert_eq!(claims.sub, user_id);
/// assert_eq!(claims.email, "ada@example.com");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token issuer claim, checked on verification
const ISSUER: &str = "visionize";

/// Default session validity
pub const DEFAULT_TTL_HOURS: i64 = 12;

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to sign the token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature, issuer, or structural validation failed
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token expiry is in the past
    #[error("Token has expired")]
    Expired,
}

/// Signed session claims
///
/// `sub` and `email` identify the session subject; `exp` is the absolute
/// expiry as a Unix timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id
    pub sub: Uuid,

    /// Subject's email at issuance time
    pub email: String,

    /// Issuer, always "visionize"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims expiring [`DEFAULT_TTL_HOURS`] from now.
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self::with_ttl(user_id, email, Duration::hours(DEFAULT_TTL_HOURS))
    }

    /// Creates claims with an explicit validity window.
    pub fn with_ttl(user_id: Uuid, email: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            email: email.into(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Whether the expiry timestamp is in the past.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs claims into a bearer token string.
///
/// The secret should be at least 32 bytes of random data; it is injected at
/// process startup, never read from a global.
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Verifies a bearer token and extracts its claims.
///
/// Checks signature, issuer, and expiry (no leeway). A missing, malformed,
/// tampered, or stale token all fail; callers map every failure to the same
/// unauthorized response.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.leeway = 0;

    let data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_default_ttl() {
        let claims = Claims::new(Uuid::new_v4(), "user@example.com");
        let ttl = claims.exp - claims.iat;
        assert_eq!(ttl, DEFAULT_TTL_HOURS * 3600);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let user_id = Uuid::new_v4();
        let token = issue_token(&Claims::new(user_id, "user@example.com"), SECRET).unwrap();

        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.iss, "visionize");
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let token = issue_token(&Claims::new(Uuid::new_v4(), "a@b.c"), SECRET).unwrap();
        assert!(verify_token(&token, "completely-different-secret-value").is_err());
    }

    #[test]
    fn test_verify_malformed_token() {
        assert!(verify_token("", SECRET).is_err());
        assert!(verify_token("not.a.jwt", SECRET).is_err());
        assert!(verify_token("Bearer abc", SECRET).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = issue_token(&Claims::new(Uuid::new_v4(), "a@b.c"), SECRET).unwrap();
        let mut tampered = token.clone();
        tampered.pop();
        tampered.push(if token.ends_with('A') { 'B' } else { 'A' });
        assert!(verify_token(&tampered, SECRET).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims::with_ttl(Uuid::new_v4(), "a@b.c", Duration::seconds(-60));
        assert!(claims.is_expired());

        let token = issue_token(&claims, SECRET).unwrap();
        let result = verify_token(&token, SECRET);
        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_token_just_inside_ttl_verifies() {
        // Issued 11h59m ago with a 12h window: still valid.
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@b.c".to_string(),
            iss: "visionize".to_string(),
            iat: (now - Duration::minutes(719)).timestamp(),
            exp: (now + Duration::minutes(1)).timestamp(),
        };
        let token = issue_token(&claims, SECRET).unwrap();
        assert!(verify_token(&token, SECRET).is_ok());
    }

    #[test]
    fn test_token_just_past_ttl_fails() {
        // Issued 12h01m ago with a 12h window: expired.
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@b.c".to_string(),
            iss: "visionize".to_string(),
            iat: (now - Duration::minutes(721)).timestamp(),
            exp: (now - Duration::minutes(1)).timestamp(),
        };
        let token = issue_token(&claims, SECRET).unwrap();
        assert!(matches!(verify_token(&token, SECRET), Err(JwtError::Expired)));
    }
}
