//! Request context middleware.
//!
//! Runs once per request: resolves the caller's identity and stores a
//! `RequestContext` in request extensions for handlers
//! (`RequestCtxExtractor`). An API key that fails to resolve is answered with
//! 401 here and no handler runs.

pub mod extract;
pub mod resolve;

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::ContextShell;
use crate::services::session::Session;
use crate::state::AppState;

pub use resolve::{Resolution, resolve};

pub const INVALID_API_KEY_MESSAGE: &str = "Invalid API key";

/// Attach the context middleware to every route (and the fallback) of `router`.
///
/// ```ignore
/// let router = Router::new().nest("/api/v1", api::v1::routes());
/// let router = middleware::context::apply(router, state.clone()).with_state(state);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, context_middleware))
}

async fn context_middleware(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let session = Session::from_headers(
        req.headers(),
        &state.session_cookie,
        state.sessions.clone(),
    );

    let shell = ContextShell {
        path: original_uri.path().to_string(),
        session,
        app_env: state.app_env,
        pages: state.pages.clone(),
        body_limit: state.body_limit,
    };

    let resolution = resolve(
        state.identity.as_ref(),
        &shell.session,
        req.headers(),
        &original_uri,
    )
    .await;

    let ctx = match resolution {
        Resolution::Authenticated { user, source } => shell.signed_in(user, source),
        Resolution::Anonymous => shell.anonymous(),
        Resolution::Rejected(err) => {
            // logged by resolve; the anonymous context only renders the 401
            return shell.anonymous().error_response(
                StatusCode::UNAUTHORIZED,
                INVALID_API_KEY_MESSAGE,
                Some(&err),
            );
        }
    };

    // middleware → extractor
    req.extensions_mut().insert(ctx);

    next.run(req).await
}
