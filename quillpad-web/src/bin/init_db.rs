//! # Quillpad database initializer
//!
//! Creates the tables and indexes and inserts the demonstration rows. Safe to
//! run repeatedly: existing tables, indexes and rows are left untouched.
//!
//! ```bash
//! cargo run -p quillpad-web --bin init-db
//! cargo run -p quillpad-web --bin init-db -- --database-url sqlite://other.db --schema-only
//! ```

use clap::Parser;
use quillpad_shared::db::{
    pool::{Database, DatabaseConfig, DEFAULT_DATABASE_URL},
    schema,
};
use quillpad_web::{config, telemetry};

#[derive(Parser, Debug)]
#[command(name = "init-db", version, about = "Create and seed the Quillpad database")]
struct Args {
    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    /// Create tables and indexes without inserting sample rows
    #[arg(long)]
    schema_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    telemetry::init_tracing(config::default_log_filter(false), false);

    let db = Database::connect(DatabaseConfig {
        url: args.database_url.clone(),
        max_connections: 1,
        ..Default::default()
    })
    .await?;

    {
        let mut conn = db.acquire().await?;
        schema::initialize(&mut conn, !args.schema_only).await?;
    }

    db.close().await;

    println!("Database initialized successfully!");
    println!("Database: {}", args.database_url);
    Ok(())
}
