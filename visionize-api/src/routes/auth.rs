/// Authentication endpoints
///
/// - `POST /api/auth/signup`: register a new account
/// - `POST /api/auth/signin`: exchange credentials for a session token
///
/// Signin failures are a single generic 400 whether the email is unknown or
/// the password wrong, so responses cannot be used to enumerate accounts.
/// Duplicate signup is also a 400 ("User already exists"), a legacy status
/// choice kept as-is.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::Json,
};
use axum::extract::State;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use visionize_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, User, UserProfile},
};

/// Signup request body
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub password: Option<String>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profession: Option<String>,
    pub birth_date: Option<String>,
}

/// Signup response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub ok: bool,
    pub user_id: Uuid,
}

/// Signin request body
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Signin response: the session token plus the client-facing profile
#[derive(Debug, Serialize, Deserialize)]
pub struct SigninResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Registers a new user.
///
/// The password is hashed before it touches the database; the duplicate
/// check races with the unique constraint, which catches the remainder.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<Json<SignupResponse>> {
    let (Some(email), Some(password)) = (req.email.clone(), req.password.clone()) else {
        return Err(ApiError::BadRequest("Email and password required".to_string()));
    };

    req.validate()
        .map_err(|_| ApiError::BadRequest("Invalid email format".to_string()))?;

    if User::find_by_email(&state.db, &email).await?.is_some() {
        return Err(ApiError::BadRequest("User already exists".to_string()));
    }

    let password_hash = password::hash_password(&password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            email,
            password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
            profession: req.profession,
            birth_date: req.birth_date,
        },
    )
    .await?;

    Ok(Json(SignupResponse {
        ok: true,
        user_id: user.id,
    }))
}

/// Authenticates a user and issues a session token.
pub async fn signin(
    State(state): State<AppState>,
    Json(req): Json<SigninRequest>,
) -> ApiResult<Json<SigninResponse>> {
    let invalid = || ApiError::BadRequest("Invalid credentials".to_string());

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(invalid)?;

    if !password::verify_password(&req.password, &user.password_hash)? {
        return Err(invalid());
    }

    let claims = jwt::Claims::with_ttl(
        user.id,
        user.email.clone(),
        Duration::hours(state.config.auth.token_ttl_hours),
    );
    let token = jwt::issue_token(&claims, state.jwt_secret())
        .map_err(|e| ApiError::Internal(format!("Token issuance failed: {}", e)))?;

    Ok(Json(SigninResponse {
        token,
        user: user.profile(),
    }))
}
