/// One-shot flash notifications
///
/// Write handlers queue a notification and redirect; the next page render
/// takes the queue and clears it. The queue lives in a single signed cookie
/// holding a URL-encoded JSON list, so it survives the redirect without any
/// server-side session state and cannot be forged without `SECRET_KEY`.
///
/// # Example
///
/// ```no_run
/// use axum::response::Redirect;
/// use axum_extra::extract::SignedCookieJar;
/// use quillpad_web::flash::{self, Flash};
///
/// async fn handler(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
///     let jar = flash::push(jar, Flash::success("Saved!"));
///     (jar, Redirect::to("/"))
/// }
/// ```

use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::SignedCookieJar;
use serde::{Deserialize, Serialize};

/// Name of the cookie carrying pending notifications
pub const FLASH_COOKIE: &str = "flash";

/// Notification category, used as a CSS class by the views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }
}

/// A single notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

/// Appends a notification to the pending queue
pub fn push(jar: SignedCookieJar, flash: Flash) -> SignedCookieJar {
    let mut pending = pending(&jar);
    pending.push(flash);

    match encode(&pending) {
        Some(value) => jar.add(
            Cookie::build((FLASH_COOKIE, value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        ),
        None => jar,
    }
}

/// Removes and returns all pending notifications
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Vec<Flash>) {
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, Vec::new());
    }

    let flashes = pending(&jar);
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, flashes)
}

/// Reads pending notifications without consuming them
///
/// A cookie that fails verification or decoding yields an empty list.
pub fn pending(jar: &SignedCookieJar) -> Vec<Flash> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| decode(cookie.value()))
        .unwrap_or_default()
}

fn encode(flashes: &[Flash]) -> Option<String> {
    match serde_json::to_string(flashes) {
        Ok(json) => Some(urlencoding::encode(&json).into_owned()),
        Err(err) => {
            tracing::warn!(error = %err, "Failed to encode flash messages");
            None
        }
    }
}

fn decode(value: &str) -> Option<Vec<Flash>> {
    let json = urlencoding::decode(value).ok()?;
    match serde_json::from_str(&json) {
        Ok(flashes) => Some(flashes),
        Err(err) => {
            tracing::debug!(error = %err, "Discarding unreadable flash cookie");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Key;

    fn jar() -> SignedCookieJar {
        SignedCookieJar::new(Key::from(&[7u8; 64][..]))
    }

    #[test]
    fn test_push_then_take() {
        let jar = push(jar(), Flash::success("User added successfully!"));
        let jar = push(jar, Flash::error("Error: Username or email already exists!"));

        let (jar, flashes) = take(jar);
        assert_eq!(
            flashes,
            vec![
                Flash::success("User added successfully!"),
                Flash::error("Error: Username or email already exists!"),
            ]
        );

        assert!(pending(&jar).is_empty());
    }

    #[test]
    fn test_take_without_cookie() {
        let (_, flashes) = take(jar());
        assert!(flashes.is_empty());
    }

    #[test]
    fn test_cookie_value_is_header_safe() {
        let jar = push(jar(), Flash::error("Error adding post: \"quoted\"; ünïcode"));
        let cookie = jar.get(FLASH_COOKIE).unwrap();

        assert!(cookie.value().chars().all(|c| c.is_ascii_alphanumeric() || "-_.~%".contains(c)));
        assert_eq!(
            decode(cookie.value()),
            Some(vec![Flash::error("Error adding post: \"quoted\"; ünïcode")])
        );
    }

    #[test]
    fn test_level_serialization() {
        assert_eq!(serde_json::to_string(&FlashLevel::Success).unwrap(), "\"success\"");
        assert_eq!(FlashLevel::Error.as_str(), "error");
    }
}
