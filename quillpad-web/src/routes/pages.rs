/// Server-rendered pages and form submissions
///
/// Page handlers hold one pooled connection for the request, run their
/// queries, and render. Read faults propagate as [`ApiError`].
///
/// The two form endpoints never fail outright: every outcome, including a body
/// that does not deserialize, becomes a flash notification followed by a
/// `303 See Other` to the matching listing page.
///
/// # Endpoints
///
/// - `GET /` - Dashboard
/// - `GET /users` - Users page
/// - `GET /posts` - Posts page
/// - `POST /add_user` - Form fields `username`, `email`
/// - `POST /add_post` - Form fields `title`, `content`, `user_id`

use crate::{
    app::{AppState, DbConn},
    error::ApiResult,
    flash::{self, Flash},
    views,
};
use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::SignedCookieJar;
use quillpad_shared::{
    db::pool::Database,
    error::WriteError,
    models::{
        post::{CreatePost, Post},
        stats::Stats,
        user::{CreateUser, User},
    },
};
use serde::Deserialize;

/// Add-user form body
#[derive(Debug, Deserialize)]
pub struct AddUserForm {
    pub username: String,
    pub email: String,
}

/// Add-post form body
#[derive(Debug, Deserialize)]
pub struct AddPostForm {
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

/// Dashboard with aggregate row counts
pub async fn index(
    DbConn(mut conn): DbConn,
    jar: SignedCookieJar,
) -> ApiResult<(SignedCookieJar, Html<String>)> {
    let stats = Stats::collect(&mut conn).await?;
    let (jar, flashes) = flash::take(jar);

    Ok((jar, Html(views::index_page(&stats, &flashes))))
}

/// All users, newest first
pub async fn users(
    DbConn(mut conn): DbConn,
    jar: SignedCookieJar,
) -> ApiResult<(SignedCookieJar, Html<String>)> {
    let users = User::list_recent(&mut conn).await?;
    let (jar, flashes) = flash::take(jar);

    Ok((jar, Html(views::users_page(&users, &flashes))))
}

/// All posts with author and comment count, plus the author list for the form
pub async fn posts(
    DbConn(mut conn): DbConn,
    jar: SignedCookieJar,
) -> ApiResult<(SignedCookieJar, Html<String>)> {
    let posts = Post::list_summaries(&mut conn).await?;
    let authors = User::list_options(&mut conn).await?;
    let (jar, flashes) = flash::take(jar);

    Ok((jar, Html(views::posts_page(&posts, &authors, &flashes))))
}

/// Inserts a user and redirects to `/users`
pub async fn add_user(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    form: Result<Form<AddUserForm>, FormRejection>,
) -> (SignedCookieJar, Redirect) {
    let outcome = match form {
        Ok(Form(form)) => {
            let data = CreateUser {
                username: form.username,
                email: form.email,
            };
            insert_user(&state.db, data).await
        }
        Err(rejection) => Err(rejected(rejection)),
    };

    let notice = match outcome {
        Ok(user_id) => {
            tracing::info!(user_id, "User added");
            Flash::success("User added successfully!")
        }
        Err(err) if err.is_duplicate() => {
            tracing::warn!(error = %err, "Rejected duplicate user");
            Flash::error("Error: Username or email already exists!")
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to add user");
            Flash::error(format!("Error adding user: {}", err))
        }
    };

    (flash::push(jar, notice), Redirect::to("/users"))
}

/// Inserts a post and redirects to `/posts`
pub async fn add_post(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    form: Result<Form<AddPostForm>, FormRejection>,
) -> (SignedCookieJar, Redirect) {
    let outcome = match form {
        Ok(Form(form)) => {
            let data = CreatePost {
                title: form.title,
                content: form.content,
                user_id: form.user_id,
            };
            insert_post(&state.db, data).await
        }
        Err(rejection) => Err(rejected(rejection)),
    };

    let notice = match outcome {
        Ok(post_id) => {
            tracing::info!(post_id, "Post added");
            Flash::success("Post added successfully!")
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to add post");
            Flash::error(format!("Error adding post: {}", err))
        }
    };

    (flash::push(jar, notice), Redirect::to("/posts"))
}

/// Fallback for unknown paths
pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(views::not_found_page()))
}

// A body missing a field, or with a non-integer `user_id`, is reported like a
// store failure so the caller still gets a notification and a redirect.
fn rejected(rejection: FormRejection) -> WriteError {
    tracing::debug!(error = %rejection, "Unreadable form body");
    WriteError::Storage(rejection.body_text())
}

// The connection is acquired here rather than by an extractor so that an
// acquire failure still ends in a notification and a redirect.
async fn insert_user(db: &Database, data: CreateUser) -> Result<i64, WriteError> {
    let mut conn = db.acquire().await?;
    User::create(&mut conn, data).await
}

async fn insert_post(db: &Database, data: CreatePost) -> Result<i64, WriteError> {
    let mut conn = db.acquire().await?;
    Post::create(&mut conn, data).await
}
