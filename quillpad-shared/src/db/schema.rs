/// Schema initializer and demonstration data
///
/// Every statement here is idempotent: tables and indexes use
/// `IF NOT EXISTS`, and sample rows are matched on their natural keys
/// (username/email for users, content plus references for posts and
/// comments), so a second run leaves definitions and row counts as they were.
/// Ids are never fixed; rows added through the application before seeding
/// keep theirs. Errors are returned to the caller unchanged.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     username VARCHAR(80) UNIQUE NOT NULL,
///     email VARCHAR(120) UNIQUE NOT NULL,
///     created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
/// );
/// ```
///
/// `posts` and `comments` follow the same pattern and declare foreign keys to
/// `users` and `posts`.
///
/// # Example
///
/// ```no_run
/// use quillpad_shared::db::pool::{Database, DatabaseConfig};
/// use quillpad_shared::db::schema;
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let db = Database::connect(DatabaseConfig::default()).await?;
/// let mut conn = db.acquire().await?;
///
/// schema::initialize(&mut conn, true).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;
use tracing::{debug, info};

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username VARCHAR(80) UNIQUE NOT NULL,
        email VARCHAR(120) UNIQUE NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

const CREATE_POSTS: &str = r#"
    CREATE TABLE IF NOT EXISTS posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title VARCHAR(200) NOT NULL,
        content TEXT NOT NULL,
        user_id INTEGER NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (user_id) REFERENCES users (id)
    )
"#;

const CREATE_COMMENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS comments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        content TEXT NOT NULL,
        post_id INTEGER NOT NULL,
        user_id INTEGER NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (post_id) REFERENCES posts (id),
        FOREIGN KEY (user_id) REFERENCES users (id)
    )
"#;

/// Supporting indexes, by name and definition
pub const INDEXES: [(&str, &str); 6] = [
    (
        "idx_users_username",
        "CREATE INDEX IF NOT EXISTS idx_users_username ON users(username)",
    ),
    (
        "idx_users_email",
        "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)",
    ),
    (
        "idx_posts_user_id",
        "CREATE INDEX IF NOT EXISTS idx_posts_user_id ON posts(user_id)",
    ),
    (
        "idx_posts_created_at",
        "CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts(created_at)",
    ),
    (
        "idx_comments_post_id",
        "CREATE INDEX IF NOT EXISTS idx_comments_post_id ON comments(post_id)",
    ),
    (
        "idx_comments_user_id",
        "CREATE INDEX IF NOT EXISTS idx_comments_user_id ON comments(user_id)",
    ),
];

/// Sample users: (username, email)
pub const SAMPLE_USERS: [(&str, &str); 3] = [
    ("john_doe", "john@example.com"),
    ("jane_smith", "jane@example.com"),
    ("bob_wilson", "bob@example.com"),
];

/// Sample posts: (title, content, author position in `SAMPLE_USERS`)
pub const SAMPLE_POSTS: [(&str, &str, usize); 4] = [
    ("First Post", "This is the content of the first post", 0),
    ("Second Post", "Another interesting post here", 1),
    ("Third Post", "More content for the third post", 0),
    ("Fourth Post", "Final post content", 2),
];

/// Sample comments: (content, post position in `SAMPLE_POSTS`, author position)
pub const SAMPLE_COMMENTS: [(&str, usize, usize); 5] = [
    ("Great post!", 0, 1),
    ("Thanks for sharing", 0, 2),
    ("Interesting perspective", 1, 0),
    ("I agree with this", 2, 1),
    ("Nice work", 3, 0),
];

/// Creates the `users`, `posts` and `comments` tables if they are missing
pub async fn init_schema(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    for statement in [CREATE_USERS, CREATE_POSTS, CREATE_COMMENTS] {
        sqlx::query(statement).execute(&mut *conn).await?;
    }

    debug!("Tables ensured");
    Ok(())
}

/// Creates the six supporting indexes if they are missing
pub async fn create_indexes(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    for (name, statement) in INDEXES {
        sqlx::query(statement).execute(&mut *conn).await?;
        debug!(index = name, "Index ensured");
    }

    Ok(())
}

/// Inserts the fixed demonstration users, posts and comments
///
/// Runs in a single transaction: either every missing sample row is added or
/// none is. A sample user whose username or email is already taken is not
/// inserted again; the existing row stands in for it as an author.
pub async fn insert_sample_data(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    let mut tx = conn.begin().await?;
    let mut inserted = 0u64;

    let mut user_ids = Vec::with_capacity(SAMPLE_USERS.len());
    for (username, email) in SAMPLE_USERS {
        inserted += sqlx::query("INSERT OR IGNORE INTO users (username, email) VALUES (?, ?)")
            .bind(username)
            .bind(email)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let id: i64 = sqlx::query_scalar(
            r#"
            SELECT id FROM users
            WHERE username = ? OR email = ?
            ORDER BY username = ? DESC, id
            LIMIT 1
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(username)
        .fetch_one(&mut *tx)
        .await?;
        user_ids.push(id);
    }

    let mut post_ids = Vec::with_capacity(SAMPLE_POSTS.len());
    for (title, content, author) in SAMPLE_POSTS {
        let user_id = user_ids[author];

        inserted += sqlx::query(
            r#"
            INSERT INTO posts (title, content, user_id)
            SELECT ?, ?, ?
            WHERE NOT EXISTS (
                SELECT 1 FROM posts WHERE title = ? AND content = ? AND user_id = ?
            )
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(user_id)
        .bind(title)
        .bind(content)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let id: i64 = sqlx::query_scalar(
            "SELECT id FROM posts WHERE title = ? AND content = ? AND user_id = ? ORDER BY id LIMIT 1",
        )
        .bind(title)
        .bind(content)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        post_ids.push(id);
    }

    for (content, post, author) in SAMPLE_COMMENTS {
        let post_id = post_ids[post];
        let user_id = user_ids[author];

        inserted += sqlx::query(
            r#"
            INSERT INTO comments (content, post_id, user_id)
            SELECT ?, ?, ?
            WHERE NOT EXISTS (
                SELECT 1 FROM comments WHERE content = ? AND post_id = ? AND user_id = ?
            )
            "#,
        )
        .bind(content)
        .bind(post_id)
        .bind(user_id)
        .bind(content)
        .bind(post_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    tx.commit().await?;

    info!(rows_inserted = inserted, "Sample data inserted");
    Ok(())
}

/// Runs the full initializer: tables, indexes and optionally sample data
pub async fn initialize(
    conn: &mut SqliteConnection,
    with_sample_data: bool,
) -> Result<(), sqlx::Error> {
    info!(with_sample_data, "Initializing database schema");

    init_schema(conn).await?;
    create_indexes(conn).await?;

    if with_sample_data {
        insert_sample_data(conn).await?;
    }

    info!("Database initialized successfully");
    Ok(())
}

/// Names of the application tables, sorted
pub async fn list_tables(conn: &mut SqliteConnection) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT name FROM sqlite_master
        WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
        ORDER BY name
        "#,
    )
    .fetch_all(&mut *conn)
    .await
}

/// Names of the explicitly created indexes, sorted
///
/// Indexes SQLite creates on its own for `UNIQUE` columns are excluded.
pub async fn list_indexes(conn: &mut SqliteConnection) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT name FROM sqlite_master
        WHERE type = 'index' AND name NOT LIKE 'sqlite_autoindex_%'
        ORDER BY name
        "#,
    )
    .fetch_all(&mut *conn)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_references_are_in_range() {
        for (_, _, author) in SAMPLE_POSTS {
            assert!(author < SAMPLE_USERS.len());
        }
        for (_, post, author) in SAMPLE_COMMENTS {
            assert!(post < SAMPLE_POSTS.len());
            assert!(author < SAMPLE_USERS.len());
        }
    }

    #[test]
    fn test_index_statements_match_names() {
        for (name, statement) in INDEXES {
            assert!(statement.contains(name), "{} not in {}", name, statement);
            assert!(statement.starts_with("CREATE INDEX IF NOT EXISTS"));
        }
    }
}
