#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Identity resolution through the context middleware.
//!
//! A `whoami` route reports what the handler saw and counts how often it ran,
//! so rejection can be checked as "no handler executed".

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{Json, Router, body::Body, http::StatusCode, routing};
use request_context::{
    api::extractors::RequestCtxExtractor, config::AppEnv, middleware, state::AppState,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{FakeIdentity, FakeSessions, alice, body_json, deploy_key, get, with_session};

fn whoami_router(state: AppState, hits: Arc<AtomicUsize>) -> Router {
    let whoami = move |RequestCtxExtractor(ctx): RequestCtxExtractor| {
        let hits = hits.clone();
        async move {
            hits.fetch_add(1, Ordering::SeqCst);
            let user = ctx.signed_in_user();
            Json(json!({
                "signed_in": ctx.is_signed_in(),
                "source": ctx.auth_source(),
                "user_id": user.and_then(|u| u.user_id),
                "account_id": user.map(|u| u.account_id),
                "role": user.map(|u| u.account_role),
                "api_key_id": user.and_then(|u| u.api_key_id),
                "login": user.map(|u| u.login.clone()),
            }))
        }
    };

    let router = Router::new()
        .route("/api/whoami", routing::get(whoami.clone()))
        .route("/dashboards", routing::get(whoami));

    middleware::context::apply(router, state.clone()).with_state(state)
}

struct Harness {
    identity: Arc<FakeIdentity>,
    hits: Arc<AtomicUsize>,
    router: Router,
}

impl Harness {
    fn new(identity: FakeIdentity, sessions: FakeSessions, app_env: AppEnv) -> Self {
        let identity = Arc::new(identity);
        let hits = Arc::new(AtomicUsize::new(0));
        let router = whoami_router(
            common::state(identity.clone(), sessions, app_env),
            hits.clone(),
        );
        Self {
            identity,
            hits,
            router,
        }
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    async fn send(&self, req: axum::http::Request<Body>) -> (StatusCode, Value) {
        let res = self.router.clone().oneshot(req).await.expect("request failed");
        let status = res.status();
        (status, body_json(res).await)
    }
}

#[tokio::test]
async fn session_user_is_signed_in_with_looked_up_identity() {
    let h = Harness::new(
        FakeIdentity::default().with_user(alice()),
        FakeSessions::default().with("s1", "uid", "1"),
        AppEnv::Production,
    );

    let (status, body) = h
        .send(with_session(get("/api/whoami"), "s1").body(Body::empty()).unwrap())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signed_in"], true);
    assert_eq!(body["source"], "session");
    assert_eq!(body["user_id"], 1);
    assert_eq!(body["account_id"], 10);
    assert_eq!(body["role"], "Admin");
    assert_eq!(body["login"], "alice");
    assert_eq!(body["api_key_id"], Value::Null);
    assert_eq!(h.hits(), 1);
}

#[tokio::test]
async fn anonymous_request_still_reaches_handler() {
    let h = Harness::new(
        FakeIdentity::default(),
        FakeSessions::default(),
        AppEnv::Production,
    );

    let (status, body) = h
        .send(get("/dashboards").body(Body::empty()).unwrap())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signed_in"], false);
    assert_eq!(body["source"], Value::Null);
    assert_eq!(body["user_id"], Value::Null);
    assert_eq!(h.hits(), 1);
    assert_eq!(h.identity.user_lookups(), 0);
    assert_eq!(h.identity.key_lookups(), 0);
}

#[tokio::test]
async fn unknown_session_cookie_is_anonymous() {
    let h = Harness::new(
        FakeIdentity::default().with_user(alice()),
        FakeSessions::default().with("s1", "uid", "1"),
        AppEnv::Production,
    );

    let (status, body) = h
        .send(with_session(get("/dashboards"), "expired").body(Body::empty()).unwrap())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signed_in"], false);
    assert_eq!(h.identity.user_lookups(), 0);
}

#[tokio::test]
async fn failed_session_lookup_fails_open_without_trying_api_key() {
    // session points at a user the backend no longer knows
    let h = Harness::new(
        FakeIdentity::default().with_key("good-key", deploy_key()),
        FakeSessions::default().with("s1", "uid", "99"),
        AppEnv::Production,
    );

    let req = with_session(get("/api/whoami"), "s1")
        .header("authorization", "Bearer good-key")
        .body(Body::empty())
        .unwrap();
    let (status, body) = h.send(req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signed_in"], false);
    assert_eq!(h.hits(), 1);
    assert_eq!(h.identity.user_lookups(), 1);
    assert_eq!(h.identity.key_lookups(), 0);
}

#[tokio::test]
async fn session_identity_takes_precedence_over_api_key() {
    let h = Harness::new(
        FakeIdentity::default()
            .with_user(alice())
            .with_key("good-key", deploy_key()),
        FakeSessions::default().with("s1", "uid", "1"),
        AppEnv::Production,
    );

    let req = with_session(get("/api/whoami"), "s1")
        .header("x-api-key", "good-key")
        .body(Body::empty())
        .unwrap();
    let (_, body) = h.send(req).await;

    assert_eq!(body["source"], "session");
    assert_eq!(body["user_id"], 1);
    assert_eq!(body["api_key_id"], Value::Null);
    assert_eq!(h.identity.key_lookups(), 0);
}

#[tokio::test]
async fn invalid_api_key_is_rejected_before_any_handler() {
    let h = Harness::new(
        FakeIdentity::default().with_key("good-key", deploy_key()),
        FakeSessions::default(),
        AppEnv::Production,
    );

    let req = get("/api/whoami")
        .header("authorization", "Bearer wrong-key")
        .body(Body::empty())
        .unwrap();
    let (status, body) = h.send(req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"message": "Invalid API key"}));
    assert_eq!(h.hits(), 0);
    assert_eq!(h.identity.key_lookups(), 1);
}

#[tokio::test]
async fn invalid_api_key_detail_is_shown_outside_production() {
    let h = Harness::new(
        FakeIdentity::default(),
        FakeSessions::default(),
        AppEnv::Development,
    );

    let req = get("/dashboards?api_key=nope")
        .body(Body::empty())
        .unwrap();
    let (status, body) = h.send(req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({"message": "Invalid API key", "error": "api key not found"})
    );
    assert_eq!(h.hits(), 0);
}

#[tokio::test]
async fn valid_api_key_signs_in_as_account_role_without_user() {
    let h = Harness::new(
        FakeIdentity::default().with_key("good-key", deploy_key()),
        FakeSessions::default(),
        AppEnv::Production,
    );

    let req = get("/api/whoami")
        .header("x-api-key", "good-key")
        .body(Body::empty())
        .unwrap();
    let (status, body) = h.send(req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["signed_in"], true);
    assert_eq!(body["source"], "api_key");
    assert_eq!(body["user_id"], Value::Null);
    assert_eq!(body["account_id"], 20);
    assert_eq!(body["role"], "Editor");
    assert_eq!(body["api_key_id"], 77);
    assert_eq!(body["login"], "");
    assert_eq!(h.identity.user_lookups(), 0);
}

#[tokio::test]
async fn unparseable_session_user_id_falls_through_to_api_key() {
    let h = Harness::new(
        FakeIdentity::default().with_key("good-key", deploy_key()),
        FakeSessions::default().with("s1", "uid", "not-a-number"),
        AppEnv::Production,
    );

    let req = with_session(get("/api/whoami"), "s1")
        .header("authorization", "Bearer good-key")
        .body(Body::empty())
        .unwrap();
    let (status, body) = h.send(req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "api_key");
    assert_eq!(h.identity.user_lookups(), 0);
    assert_eq!(h.identity.key_lookups(), 1);
}

#[tokio::test]
async fn api_key_from_query_parameter_is_accepted() {
    let h = Harness::new(
        FakeIdentity::default().with_key("good-key", deploy_key()),
        FakeSessions::default(),
        AppEnv::Production,
    );

    let (status, body) = h
        .send(get("/dashboards?api_key=good-key").body(Body::empty()).unwrap())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api_key_id"], 77);
}
