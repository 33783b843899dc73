/// Integration tests for the server-rendered pages and form endpoints

mod common;

use axum::http::{header, StatusCode};
use common::{body_string, flash_cookie, set_cookies, TestContext};
use quillpad_shared::models::stats::Stats;

#[tokio::test]
async fn test_dashboard_shows_seeded_counts() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.get("/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = body_string(response).await;
    assert!(html.contains("id=\"stat-users\">3<"));
    assert!(html.contains("id=\"stat-posts\">4<"));
    assert!(html.contains("id=\"stat-comments\">5<"));
}

#[tokio::test]
async fn test_users_page_lists_newest_first() {
    let ctx = TestContext::new().await.unwrap();

    let html = body_string(ctx.get("/users", None).await).await;

    let bob = html.find("bob_wilson").unwrap();
    let jane = html.find("jane_smith").unwrap();
    let john = html.find("john_doe").unwrap();
    assert!(bob < jane && jane < john);
}

#[tokio::test]
async fn test_posts_page_shows_authors_and_comment_counts() {
    let ctx = TestContext::new().await.unwrap();

    let html = body_string(ctx.get("/posts", None).await).await;

    assert!(html.contains("<option value=\"1\">john_doe</option>"));
    assert!(html.contains("<span class=\"comment-count\">2</span> comments"));
    assert!(html.contains("<span class=\"comment-count\">1</span> comment<"));
}

#[tokio::test]
async fn test_posts_page_without_users() {
    let ctx = TestContext::empty().await.unwrap();

    let html = body_string(ctx.get("/posts", None).await).await;
    assert!(html.contains("No users available"));
}

#[tokio::test]
async fn test_add_user_success_flashes_once() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .post_form("/add_user", &[("username", "alice"), ("email", "alice@example.com")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/users");

    let cookie = flash_cookie(&response).unwrap();

    let response = ctx.get("/users", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("flash=") && c.contains("Max-Age=0")));

    let html = body_string(response).await;
    assert!(html.contains("<div class=\"flash success\" role=\"alert\">User added successfully!</div>"));
    assert!(html.contains("alice@example.com"));

    let html = body_string(ctx.get("/users", None).await).await;
    assert!(!html.contains("User added successfully!"));
}

#[tokio::test]
async fn test_add_user_duplicate_username() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .post_form("/add_user", &[("username", "john_doe"), ("email", "other@example.com")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let cookie = flash_cookie(&response).unwrap();
    let html = body_string(ctx.get("/users", Some(&cookie)).await).await;
    assert!(html.contains("Error: Username or email already exists!"));

    let mut conn = ctx.db.acquire().await.unwrap();
    assert_eq!(Stats::collect(&mut conn).await.unwrap().users, 3);
}

#[tokio::test]
async fn test_add_user_duplicate_email() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .post_form("/add_user", &[("username", "someone"), ("email", "jane@example.com")])
        .await;

    let cookie = flash_cookie(&response).unwrap();
    let html = body_string(ctx.get("/", Some(&cookie)).await).await;
    assert!(html.contains("Error: Username or email already exists!"));
    assert!(html.contains("id=\"stat-users\">3<"));
}

#[tokio::test]
async fn test_add_user_missing_field_still_redirects() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.post_form("/add_user", &[("username", "alice")]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/users");

    let cookie = flash_cookie(&response).unwrap();
    let html = body_string(ctx.get("/users", Some(&cookie)).await).await;
    assert!(html.contains("<div class=\"flash error\" role=\"alert\">Error adding user: "));

    let mut conn = ctx.db.acquire().await.unwrap();
    assert_eq!(Stats::collect(&mut conn).await.unwrap().users, 3);
}

#[tokio::test]
async fn test_add_post_unreadable_user_id_still_redirects() {
    let ctx = TestContext::new().await.unwrap();

    for user_id in ["abc", ""] {
        let response = ctx
            .post_form(
                "/add_post",
                &[("title", "T"), ("content", "C"), ("user_id", user_id)],
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "user_id={:?}", user_id);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/posts");

        let cookie = flash_cookie(&response).unwrap();
        let html = body_string(ctx.get("/posts", Some(&cookie)).await).await;
        assert!(html.contains("<div class=\"flash error\" role=\"alert\">Error adding post: "));
    }

    let mut conn = ctx.db.acquire().await.unwrap();
    assert_eq!(Stats::collect(&mut conn).await.unwrap().posts, 4);
}

#[tokio::test]
async fn test_add_post_success_is_listed_first() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .post_form(
            "/add_post",
            &[("title", "Fresh <news>"), ("content", "Body"), ("user_id", "2")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/posts");

    let cookie = flash_cookie(&response).unwrap();
    let html = body_string(ctx.get("/posts", Some(&cookie)).await).await;

    assert!(html.contains("Post added successfully!"));
    let fresh = html.find("Fresh &lt;news&gt;").unwrap();
    let seeded = html.find("<article class=\"card\" id=\"post-4\">").unwrap();
    assert!(fresh < seeded);
}

#[tokio::test]
async fn test_add_post_unknown_user_is_reported() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx
        .post_form(
            "/add_post",
            &[("title", "Orphan"), ("content", "Body"), ("user_id", "999")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let cookie = flash_cookie(&response).unwrap();
    let html = body_string(ctx.get("/posts", Some(&cookie)).await).await;
    assert!(html.contains("Error adding post: FOREIGN KEY constraint failed"));

    let mut conn = ctx.db.acquire().await.unwrap();
    assert_eq!(Stats::collect(&mut conn).await.unwrap().posts, 4);
}

#[tokio::test]
async fn test_add_post_unknown_user_accepted_when_lax() {
    let ctx = TestContext::with_options(true, false).await.unwrap();

    let response = ctx
        .post_form(
            "/add_post",
            &[("title", "Orphan"), ("content", "Body"), ("user_id", "999")],
        )
        .await;

    let cookie = flash_cookie(&response).unwrap();
    let html = body_string(ctx.get("/", Some(&cookie)).await).await;
    assert!(html.contains("Post added successfully!"));
    assert!(html.contains("id=\"stat-posts\">5<"));
}

#[tokio::test]
async fn test_tampered_flash_cookie_is_ignored() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.get("/users", Some("flash=forged")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(!html.contains("role=\"alert\""));
}

#[tokio::test]
async fn test_unknown_path_renders_not_found_page() {
    let ctx = TestContext::new().await.unwrap();

    let response = ctx.get("/nope", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("Page Not Found"));
}

#[tokio::test]
async fn test_security_headers_on_pages() {
    let ctx = TestContext::new().await.unwrap();
    assert!(!ctx.config.server.debug);

    let response = ctx.get("/", None).await;
    assert_eq!(response.headers().get("X-Frame-Options").unwrap(), "DENY");
    assert!(response.headers().get("Strict-Transport-Security").is_some());
}
