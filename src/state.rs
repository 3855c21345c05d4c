/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - identity lookup, session store, page renderer, environment
 * - Clone is cheap (Arc inside)
 */
use std::sync::Arc;

use crate::config::{AppEnv, DEFAULT_BODY_LIMIT_BYTES, DEFAULT_SESSION_COOKIE};
use crate::services::{
    identity::IdentityQuery,
    render::{BasicPageRenderer, PageRenderer},
    session::SessionStore,
};

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityQuery>,
    pub sessions: Arc<dyn SessionStore>,
    pub pages: Arc<dyn PageRenderer>,
    pub app_env: AppEnv,
    pub session_cookie: String,
    pub body_limit: usize,
}

impl AppState {
    pub fn new(
        identity: Arc<dyn IdentityQuery>,
        sessions: Arc<dyn SessionStore>,
        app_env: AppEnv,
    ) -> Self {
        Self {
            identity,
            sessions,
            pages: Arc::new(BasicPageRenderer),
            app_env,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            body_limit: DEFAULT_BODY_LIMIT_BYTES,
        }
    }

    pub fn with_pages(mut self, pages: Arc<dyn PageRenderer>) -> Self {
        self.pages = pages;
        self
    }

    pub fn with_session_cookie(mut self, name: impl Into<String>) -> Self {
        self.session_cookie = name.into();
        self
    }

    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }
}
