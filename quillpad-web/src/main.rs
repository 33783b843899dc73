//! # Quillpad Web Server
//!
//! Serves the dashboard, users and posts pages, the two form endpoints and
//! the read-only JSON API over a single SQLite database.
//!
//! ## Usage
//!
//! ```bash
//! APP_DEBUG=true cargo run -p quillpad-web
//! ```
//!
//! Seed demonstration data first with `cargo run -p quillpad-web --bin init-db`.

use quillpad_shared::db::{pool::Database, schema};
use quillpad_web::{
    app::{build_router, AppState},
    config::Config,
    telemetry,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    telemetry::init_tracing(config.default_log_filter(), config.server.log_json);

    tracing::info!(
        "Quillpad web server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    if config.uses_dev_secret() {
        tracing::warn!("SECRET_KEY is not set; signing flash cookies with the development key");
    }

    let db = Database::connect(config.pool_config()).await?;

    // Tables and indexes only; sample rows come from init-db
    {
        let mut conn = db.acquire().await?;
        schema::initialize(&mut conn, false).await?;
    }

    let bind_address = config.bind_address();
    let state = AppState::new(db.clone(), config);
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        return;
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
