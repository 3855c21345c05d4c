/*
 * Responsibility
 * - v1 URL structure
 * - Identity is resolved by the context middleware applied in app.rs; handlers
 *   decide themselves whether an anonymous caller is acceptable
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    health::health,
    user::{current_user, echo_message},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/user", get(current_user))
        .route("/user/echo", post(echo_message))
}
