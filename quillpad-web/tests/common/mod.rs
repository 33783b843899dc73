/// Common test utilities for integration tests
///
/// Every context gets its own SQLite file in a temporary directory, seeded
/// with the demonstration rows, and a router built exactly as the server
/// builds it.

use axum::body::Body;
use axum::http::{header, Request, Response};
use quillpad_shared::db::{
    pool::{Database, DatabaseConfig as PoolConfig},
    schema,
};
use quillpad_web::app::{build_router, AppState};
use quillpad_web::config::{Config, DatabaseConfig, ServerConfig, SessionConfig};
use tempfile::TempDir;
use tower::Service as _;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: Database,
    pub app: axum::Router,
    pub config: Config,

    // Keeps the database file alive for the duration of the test
    _dir: TempDir,
}

impl TestContext {
    /// Seeded database with foreign keys enforced
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_options(true, true).await
    }

    /// Empty schema, no sample rows
    pub async fn empty() -> anyhow::Result<Self> {
        Self::with_options(false, true).await
    }

    pub async fn with_options(seed: bool, foreign_keys: bool) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let url = format!("sqlite://{}", dir.path().join("app.db").display());

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                debug: false,
                log_json: false,
            },
            database: DatabaseConfig {
                url: url.clone(),
                max_connections: 2,
                foreign_keys,
            },
            session: SessionConfig {
                secret_key: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
        };

        let db = Database::connect(PoolConfig {
            url,
            max_connections: 2,
            foreign_keys,
            ..Default::default()
        })
        .await?;

        {
            let mut conn = db.acquire().await?;
            schema::initialize(&mut conn, seed).await?;
        }

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            _dir: dir,
        })
    }

    /// Sends a GET, optionally carrying a cookie pair (`name=value`)
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        self.app
            .clone()
            .call(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// Sends a urlencoded form POST
    pub async fn post_form(&self, uri: &str, form: &[(&str, &str)]) -> Response<Body> {
        let body = form
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();

        self.app.clone().call(request).await.unwrap()
    }
}

/// Reads the whole response body as a string
pub async fn body_string(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

/// Reads the whole response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// All `Set-Cookie` header values of a response
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

/// The `flash=...` pair from a response, ready to send back as a `Cookie` header
pub fn flash_cookie(response: &Response<Body>) -> Option<String> {
    set_cookies(response)
        .into_iter()
        .find(|cookie| cookie.starts_with("flash="))
        .and_then(|cookie| cookie.split(';').next().map(str::to_string))
}
