#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
};
use request_context::{
    config::AppEnv,
    services::{
        identity::{
            AccountId, ApiKeyId, ApiKeyInfo, IdentityError, IdentityQuery, Role, SignedInUser,
            UserId,
        },
        session::{SessionError, SessionStore},
    },
    state::AppState,
};
use serde_json::Value;

pub const SESSION_COOKIE: &str = "sess_id";

/// In-memory identity backend that counts lookups.
#[derive(Default)]
pub struct FakeIdentity {
    users: HashMap<i64, SignedInUser>,
    keys: HashMap<String, ApiKeyInfo>,
    pub user_lookups: AtomicUsize,
    pub key_lookups: AtomicUsize,
}

impl FakeIdentity {
    pub fn with_user(mut self, user: SignedInUser) -> Self {
        let id = user.user_id.expect("fake users need an id").0;
        self.users.insert(id, user);
        self
    }

    pub fn with_key(mut self, key: &str, info: ApiKeyInfo) -> Self {
        self.keys.insert(key.to_string(), info);
        self
    }

    pub fn user_lookups(&self) -> usize {
        self.user_lookups.load(Ordering::SeqCst)
    }

    pub fn key_lookups(&self) -> usize {
        self.key_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityQuery for FakeIdentity {
    async fn lookup_user_by_id(&self, user_id: UserId) -> Result<SignedInUser, IdentityError> {
        self.user_lookups.fetch_add(1, Ordering::SeqCst);
        self.users
            .get(&user_id.0)
            .cloned()
            .ok_or(IdentityError::UserNotFound)
    }

    async fn lookup_api_key_by_value(&self, key: &str) -> Result<ApiKeyInfo, IdentityError> {
        self.key_lookups.fetch_add(1, Ordering::SeqCst);
        self.keys
            .get(key)
            .cloned()
            .ok_or(IdentityError::ApiKeyNotFound)
    }
}

/// In-memory session backend: session id → (key → value).
#[derive(Default)]
pub struct FakeSessions {
    sessions: HashMap<String, HashMap<String, String>>,
}

impl FakeSessions {
    pub fn with(mut self, session_id: &str, key: &str, value: &str) -> Self {
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self
    }
}

#[async_trait]
impl SessionStore for FakeSessions {
    async fn get(&self, session_id: &str, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self
            .sessions
            .get(session_id)
            .and_then(|s| s.get(key))
            .cloned())
    }
}

pub fn alice() -> SignedInUser {
    SignedInUser {
        user_id: Some(UserId(1)),
        account_id: AccountId(10),
        account_name: "main".to_string(),
        account_role: Role::Admin,
        login: "alice".to_string(),
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        is_server_admin: false,
        api_key_id: None,
    }
}

pub fn deploy_key() -> ApiKeyInfo {
    ApiKeyInfo {
        id: ApiKeyId(77),
        account_id: AccountId(20),
        role: Role::Editor,
        name: "deploy".to_string(),
    }
}

pub fn state(identity: Arc<FakeIdentity>, sessions: FakeSessions, app_env: AppEnv) -> AppState {
    AppState::new(identity, Arc::new(sessions), app_env).with_session_cookie(SESSION_COOKIE)
}

pub fn get(uri: &str) -> axum::http::request::Builder {
    Request::builder().method("GET").uri(uri)
}

pub fn with_session(
    builder: axum::http::request::Builder,
    session_id: &str,
) -> axum::http::request::Builder {
    builder.header("cookie", format!("theme=dark; {SESSION_COOKIE}={session_id}"))
}

pub async fn body_json(res: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub async fn body_text(res: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
