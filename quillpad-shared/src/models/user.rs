/// User model and database operations
///
/// Users are created through the add-user form and are never updated or
/// deleted. Username and email are each unique across the table.
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
/// # Example
///
/// ```no_run
/// use quillpad_shared::models::user::{CreateUser, User};
/// use sqlx::SqliteConnection;
///
/// # async fn example(conn: &mut SqliteConnection) -> Result<(), Box<dyn std::error::Error>> {
/// let id = User::create(
///     conn,
///     CreateUser {
///         username: "alice".to_string(),
///         email: "alice@example.com".to_string(),
///     },
/// )
/// .await?;
///
/// let newest_first = User::list_recent(conn).await?;
/// # Ok(())
/// # }
/// ```

use crate::error::WriteError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use tracing::debug;

/// User row
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    /// Auto-assigned user ID
    pub id: i64,

    /// Unique login-style name
    pub username: String,

    /// Unique email address
    pub email: String,

    /// When the row was inserted (UTC)
    pub created_at: NaiveDateTime,
}

/// Input for creating a new user
///
/// No validation happens here; the table's `NOT NULL` and `UNIQUE`
/// constraints are the only checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
}

/// Id and username pair used to populate author selection lists
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct UserOption {
    pub id: i64,
    pub username: String,
}

impl User {
    /// Inserts a new user and returns its id
    ///
    /// `created_at` is assigned by the store.
    ///
    /// # Errors
    ///
    /// - [`WriteError::Duplicate`] if the username or email is taken
    /// - [`WriteError::Storage`] for any other failure
    pub async fn create(conn: &mut SqliteConnection, data: CreateUser) -> Result<i64, WriteError> {
        let result = sqlx::query("INSERT INTO users (username, email) VALUES (?, ?)")
            .bind(&data.username)
            .bind(&data.email)
            .execute(&mut *conn)
            .await?;

        let id = result.last_insert_rowid();
        debug!(user_id = id, username = %data.username, "User created");

        Ok(id)
    }

    /// Finds a user by ID
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Lists every user, newest first
    ///
    /// Rows inserted within the same second are ordered by descending id.
    pub async fn list_recent(conn: &mut SqliteConnection) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, created_at
            FROM users
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
    }

    /// Lists every user's id and username, alphabetically by username
    pub async fn list_options(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<UserOption>, sqlx::Error> {
        sqlx::query_as::<_, UserOption>("SELECT id, username FROM users ORDER BY username")
            .fetch_all(&mut *conn)
            .await
    }

    /// Counts total number of users
    pub async fn count(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_from_form_fields() {
        let data: CreateUser =
            serde_json::from_str(r#"{"username":"alice","email":"alice@example.com"}"#).unwrap();

        assert_eq!(data.username, "alice");
        assert_eq!(data.email, "alice@example.com");
    }

    // Database-backed tests are in tests/models_tests.rs
}
