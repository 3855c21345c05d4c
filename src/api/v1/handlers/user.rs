/*
 * Responsibility
 * - /user handlers built on RequestContext
 * - anonymous callers get the uniform JSON error, never a partial identity
 */
use axum::{
    Json,
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::extractors::RequestCtxExtractor;
use crate::api::v1::dto::user::{CurrentUserResponse, EchoRequest};

pub async fn current_user(RequestCtxExtractor(ctx): RequestCtxExtractor) -> Response {
    match ctx.signed_in_user() {
        Some(user) => Json(CurrentUserResponse::new(user, ctx.auth_source())).into_response(),
        None => ctx.respond_error(StatusCode::UNAUTHORIZED, "Unauthorized", None),
    }
}

pub async fn echo_message(RequestCtxExtractor(ctx): RequestCtxExtractor, body: Body) -> Response {
    let Some(req) = ctx.decode_body::<EchoRequest>(body).await else {
        return ctx.respond_error(StatusCode::BAD_REQUEST, "Invalid request body", None);
    };

    if let Err(msg) = req.validate() {
        return ctx.respond_error(StatusCode::BAD_REQUEST, msg, None);
    }

    ctx.respond_ok(&req.message)
}
