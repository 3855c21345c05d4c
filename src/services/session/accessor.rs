//! Per-request session accessor.
//!
//! Binds the session id carried by the request cookie to the shared
//! `SessionStore`. One `Session` per request; it is never shared across requests.
use std::fmt;
use std::sync::Arc;

use axum::http::{HeaderMap, header};

use crate::services::session::store::SessionStore;

#[derive(Clone)]
pub struct Session {
    id: Option<String>,
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(id: Option<String>, store: Arc<dyn SessionStore>) -> Self {
        Self { id, store }
    }

    /// Session bound to the id found in `cookie_name`, if any.
    pub fn from_headers(
        headers: &HeaderMap,
        cookie_name: &str,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self::new(cookie_value(headers, cookie_name), store)
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Value stored under `key`, or `None`.
    ///
    /// Store failures are logged and read as absent: a broken session backend
    /// demotes the request to anonymous instead of failing it.
    pub async fn get(&self, key: &str) -> Option<String> {
        let id = self.id.as_deref()?;

        match self.store.get(id, key).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, key, "session lookup failed");
                None
            }
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the session id is a bearer secret
        f.debug_struct("Session")
            .field("has_id", &self.id.is_some())
            .finish()
    }
}

/// First non-empty value of cookie `name` across all `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .filter(|(k, _)| *k == name)
        .map(|(_, v)| v.trim_matches('"'))
        .find(|v| !v.is_empty())
        .map(str::to_string)
}
