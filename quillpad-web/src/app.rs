/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use quillpad_shared::db::pool::Database;
/// use quillpad_web::{app::AppState, config::Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let db = Database::connect(config.pool_config()).await?;
/// let state = AppState::new(db, config);
/// let app = quillpad_web::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::Key;
use quillpad_shared::db::pool::{Database, DbConnection};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Everything inside is either a pool handle or immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Database handle
    pub db: Database,

    /// Application configuration
    pub config: Arc<Config>,

    /// Key used to sign flash cookies
    cookie_key: Key,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: Database, config: Config) -> Self {
        let cookie_key = config.cookie_key();

        Self {
            db,
            config: Arc::new(config),
            cookie_key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// A database connection held for the duration of one request
///
/// Acquired before the handler body runs and released when the handler
/// returns, whether it succeeds or fails.
pub struct DbConn(pub DbConnection);

#[async_trait]
impl FromRequestParts<AppState> for DbConn {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(state.db.acquire().await?))
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /                      # Dashboard with row counts
/// ├── GET  /users                 # Users page + add-user form
/// ├── GET  /posts                 # Posts page + add-post form
/// ├── POST /add_user              # Insert user, redirect to /users
/// ├── POST /add_post              # Insert post, redirect to /posts
/// ├── GET  /health                # Health check
/// └── /api/
///     ├── GET /users
///     ├── GET /posts
///     ├── GET /comments/:post_id
///     └── GET /stats
/// ```
///
/// Anything else renders the not-found page.
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. Security headers (HSTS only outside debug mode)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let page_routes = Router::new()
        .route("/", get(routes::pages::index))
        .route("/users", get(routes::pages::users))
        .route("/posts", get(routes::pages::posts))
        .route("/add_user", post(routes::pages::add_user))
        .route("/add_post", post(routes::pages::add_post));

    let api_routes = Router::new()
        .route("/users", get(routes::api::list_users))
        .route("/posts", get(routes::api::list_posts))
        .route("/comments/:post_id", get(routes::api::list_comments))
        .route("/stats", get(routes::api::stats));

    let debug = state.config.server.debug;
    let trace_level = if debug { Level::DEBUG } else { Level::INFO };

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(page_routes)
        .nest("/api", api_routes)
        .fallback(routes::pages::not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(trace_level))
                .on_response(DefaultOnResponse::new().level(trace_level)),
        )
        .layer(SecurityHeadersLayer::new(!debug))
        .with_state(state)
}
