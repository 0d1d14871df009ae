/// Application state and router builder
///
/// Defines the shared state handed to every handler and assembles the full
/// route tree:
///
/// ```text
/// /api
/// ├── /health                              # public
/// ├── /auth/signup, /auth/signin           # public
/// ├── /projects                            # bearer token required
/// │   ├── GET  /            list caller's projects
/// │   ├── POST /            create project
/// │   ├── GET/PUT/DELETE /:id
/// │   ├── POST   /:id/members
/// │   ├── DELETE /:id/members/:member_id
/// │   └── GET/POST /:project_id/tasks
/// └── /tasks/:task_id                      # PUT, DELETE (bearer required)
/// ```
///
/// The bearer middleware is the only authorization layer: it authenticates
/// identity and nothing else. No route checks resource ownership, so any
/// authenticated user can read or mutate any project by id. Known gap,
/// preserved deliberately.

use crate::{config::Config, error::ApiError, routes};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use visionize_shared::auth::jwt;

/// Shared application state, cloned per request
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration, injected at startup
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Signing secret for session tokens
    pub fn jwt_secret(&self) -> &str {
        &self.config.auth.jwt_secret
    }
}

/// Identity attached to a request after token verification
///
/// Handlers extract it with `Extension<AuthContext>`.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: uuid::Uuid,
    pub email: String,
}

/// Builds the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Public: no credentials needed
    let auth_routes = Router::new()
        .route("/signup", post(routes::auth::signup))
        .route("/signin", post(routes::auth::signin));

    // Everything below requires a valid bearer token
    let protected = Router::new()
        .route(
            "/projects",
            get(routes::projects::list).post(routes::projects::create),
        )
        .route(
            "/projects/:id",
            get(routes::projects::get_one)
                .put(routes::projects::update)
                .delete(routes::projects::delete),
        )
        .route("/projects/:id/members", post(routes::projects::add_member))
        .route(
            "/projects/:id/members/:member_id",
            axum::routing::delete(routes::projects::remove_member),
        )
        .route(
            "/projects/:project_id/tasks",
            get(routes::tasks::list).post(routes::tasks::create),
        )
        .route(
            "/tasks/:task_id",
            put(routes::tasks::update).delete(routes::tasks::delete),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    let api = Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/auth", auth_routes)
        .merge(protected);

    Router::new()
        // The probe answers at the root as well, for load balancers that
        // are not configured with the /api prefix.
        .route("/health", get(routes::health::health_check))
        .nest("/api", api)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .with_state(state)
}

/// CORS layer: permissive when no origins are configured, whitelist
/// otherwise.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_origins.is_empty() {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
    }
}

/// Bearer token middleware (the authorization gate)
///
/// Extracts `Authorization: Bearer <token>`, verifies it, and attaches the
/// resolved identity to the request. Every failure mode (absent header,
/// malformed value, bad signature, expiry) produces the same 401 body, so
/// nothing can be learned from the error shape.
async fn bearer_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let unauthorized = || ApiError::Unauthorized("Unauthorized".to_string());

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(unauthorized)?;

    let claims =
        jwt::verify_token(token, state.jwt_secret()).map_err(|_| unauthorized())?;

    req.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(req).await)
}
