///! Per-client session storage
///!
///! Sessions are keyed by an opaque id carried in a cookie. The store is
///! an explicit value handed to handlers through shared state, never a
///! module-level singleton; entries live until the process exits.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{header::COOKIE, HeaderMap};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "linkdex_session";

/// Key-value data attached to one client session
pub type SessionData = HashMap<String, String>;

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionData>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh session id for a client that presented none.
    pub fn mint_id() -> String {
        Uuid::now_v7().to_string()
    }

    /// Run `f` against the session's data, creating the session first if
    /// the id is unknown.
    pub async fn with_session<T>(&self, id: &str, f: impl FnOnce(&mut SessionData) -> T) -> T {
        let mut sessions = self.sessions.write().await;
        f(sessions.entry(id.to_string()).or_default())
    }

    /// Read one value without creating the session.
    pub async fn get(&self, id: &str, key: &str) -> Option<String> {
        let sessions = self.sessions.read().await;
        sessions.get(id).and_then(|data| data.get(key)).cloned()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Extract the session id from the request's Cookie headers.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            if parts.next() == Some(SESSION_COOKIE) {
                match parts.next() {
                    Some(id) if !id.is_empty() => return Some(id.to_string()),
                    _ => {}
                }
            }
        }
    }
    None
}

/// Set-Cookie value binding `id` to the client.
pub fn session_cookie(id: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_with_session_creates_and_persists() {
        let store = SessionStore::new();
        let id = SessionStore::mint_id();

        store
            .with_session(&id, |data| {
                data.insert("visits".to_string(), "1".to_string());
            })
            .await;

        assert_eq!(store.get(&id, "visits").await.as_deref(), Some("1"));
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_get_does_not_create_sessions() {
        let store = SessionStore::new();
        assert_eq!(store.get("nope", "visits").await, None);
        assert_eq!(store.session_count().await, 0);
    }

    #[test]
    fn test_mint_id_is_unique() {
        assert_ne!(SessionStore::mint_id(), SessionStore::mint_id());
    }

    #[test]
    fn test_session_id_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; linkdex_session=abc123; lang=en"),
        );
        assert_eq!(session_id_from_headers(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_session_id_absent_or_empty() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id_from_headers(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("linkdex_session="));
        assert_eq!(session_id_from_headers(&headers), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc123");
        assert!(cookie.starts_with("linkdex_session=abc123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
    }
}
