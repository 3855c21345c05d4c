/*
 * Responsibility
 * - Unmatched routes: JSON 404 for /api paths, HTML 404 page otherwise
 */
use axum::{http::StatusCode, response::Response};

use crate::api::extractors::RequestCtxExtractor;

pub async fn not_found(RequestCtxExtractor(ctx): RequestCtxExtractor) -> Response {
    if ctx.is_api_request() {
        ctx.respond_error(StatusCode::NOT_FOUND, "", None)
    } else {
        ctx.handle_error(StatusCode::NOT_FOUND, "", None)
    }
}
