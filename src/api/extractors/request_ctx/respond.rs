//! Uniform responses built from a RequestContext.
//!
//! Error detail (`err.to_string()`) reaches the client only outside production,
//! both in JSON payloads and in rendered error pages.
use std::error::Error;

use axum::{
    Json,
    body::Body,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::{Serialize, de::DeserializeOwned};

use super::RequestContext;
use crate::services::render::PageModel;

const API_PREFIX: &str = "/api";

#[derive(Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl RequestContext {
    /// Render the HTML error page for `status` (template name = decimal status).
    pub fn handle_error(
        &self,
        status: StatusCode,
        title: &str,
        err: Option<&dyn Error>,
    ) -> Response {
        let mut model = PageModel {
            title: page_title(status, title).to_string(),
            error_msg: None,
            is_signed_in: self.is_signed_in(),
            signed_in_user: self.signed_in_user().cloned(),
        };

        if let Some(err) = err {
            tracing::error!(
                status = status.as_u16(),
                path = %self.path(),
                title,
                error = %err,
                "request failed"
            );
            if !self.app_env().is_production() {
                model.error_msg = Some(err.to_string());
            }
        }

        let template = status.as_u16().to_string();
        match self.pages().render(&template, &model) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(render_err) => {
                tracing::error!(
                    template = %template,
                    error = %render_err,
                    "error page render failed"
                );
                (status, model.title).into_response()
            }
        }
    }

    /// 200 with `{"message": message}`.
    pub fn respond_ok(&self, message: &str) -> Response {
        (StatusCode::OK, Json(MessageBody { message })).into_response()
    }

    /// Plain string prefix: `/apidocs` counts as an API path too.
    pub fn is_api_request(&self) -> bool {
        self.path().starts_with(API_PREFIX)
    }

    /// JSON error response.
    ///
    /// A non-empty `message` wins over the status default; `error` carries the
    /// raw error text outside production only.
    pub fn respond_error(
        &self,
        status: StatusCode,
        message: &str,
        err: Option<&dyn Error>,
    ) -> Response {
        if let Some(err) = err {
            tracing::error!(
                status = status.as_u16(),
                path = %self.path(),
                api_message = message,
                error = %err,
                "request failed"
            );
        }
        self.error_response(status, message, err)
    }

    /// `respond_error` without the log line, for callers that already logged.
    pub(crate) fn error_response(
        &self,
        status: StatusCode,
        message: &str,
        err: Option<&dyn Error>,
    ) -> Response {
        let error = err
            .filter(|_| !self.app_env().is_production())
            .map(|err| err.to_string());

        let message = if message.is_empty() {
            default_api_message(status)
        } else {
            Some(message)
        };

        (status, Json(ErrorBody { message, error })).into_response()
    }

    /// Read the whole body and decode it as JSON.
    ///
    /// A body read failure is treated as an empty body (and so fails to decode).
    pub async fn decode_body<T: DeserializeOwned>(&self, body: Body) -> Option<T> {
        let bytes = axum::body::to_bytes(body, self.body_limit())
            .await
            .unwrap_or_default();

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(
                    path = %self.path(),
                    error = %err,
                    "request body is not valid JSON"
                );
                None
            }
        }
    }
}

fn page_title(status: StatusCode, fallback: &str) -> &str {
    match status {
        StatusCode::NOT_FOUND => "Page Not Found",
        StatusCode::INTERNAL_SERVER_ERROR => "Internal Server Error",
        _ => fallback,
    }
}

fn default_api_message(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::NOT_FOUND => Some("Not Found"),
        StatusCode::INTERNAL_SERVER_ERROR => Some("Internal Server Error"),
        _ => None,
    }
}
