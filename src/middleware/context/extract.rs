//! Credential extraction.
//!
//! Neither function fails the request: a missing or malformed credential is
//! simply absent.
//!
//! API key precedence (first non-empty wins):
//! 1. `Authorization: Bearer <key>` (scheme is case-insensitive)
//! 2. `X-Api-Key: <key>`
//! 3. `?api_key=<key>` query parameter

use axum::http::{HeaderMap, Uri, header};

use crate::services::identity::UserId;
use crate::services::session::Session;

/// Session key holding the signed-in user id.
pub const SESSION_USER_ID_KEY: &str = "uid";

pub const API_KEY_HEADER: &str = "x-api-key";
pub const API_KEY_QUERY_PARAM: &str = "api_key";

pub async fn extract_session_user_id(session: &Session) -> Option<UserId> {
    let raw = session.get(SESSION_USER_ID_KEY).await?;
    parse_user_id(&raw)
}

fn parse_user_id(raw: &str) -> Option<UserId> {
    raw.parse::<i64>().ok().filter(|id| *id > 0).map(UserId)
}

pub fn extract_api_key(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    bearer_token(headers)
        .or_else(|| header_key(headers))
        .or_else(|| query_key(uri))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    non_empty(token)
}

fn header_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(non_empty)
}

fn query_key(uri: &Uri) -> Option<String> {
    let query = uri.query()?;

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == API_KEY_QUERY_PARAM)
        .and_then(|(_, v)| non_empty(&v))
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
