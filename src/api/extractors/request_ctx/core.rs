use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use super::RequestContext;

/// Extractor that hands the RequestContext to a handler.
/// Assumes the context middleware already inserted it into request extensions;
/// a missing context is a wiring bug and answers 500.
pub struct RequestCtxExtractor(pub RequestContext);

impl<S> FromRequestParts<S> for RequestCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(RequestCtxExtractor)
            .ok_or_else(|| {
                tracing::error!(path = %parts.uri.path(), "request context missing");
                StatusCode::INTERNAL_SERVER_ERROR
            })
    }
}
