//! Authentication resolution: exactly one strategy per request.
//!
//! ```text
//! Unauthenticated ──uid──▶ SessionResolving ──ok──▶ Authenticated
//!       │                        └──err──▶ Unauthenticated (logged, fail open)
//!       └──no uid, key──▶ ApiKeyResolving ──ok──▶ Authenticated
//!                               └──err──▶ Rejected (401, fail closed)
//! ```
//!
//! When the session carries a user id the API key is never extracted.
use axum::http::{HeaderMap, Uri};
use sha2::{Digest, Sha256};

use crate::api::extractors::AuthSource;
use crate::middleware::context::extract::{extract_api_key, extract_session_user_id};
use crate::services::identity::{IdentityError, IdentityQuery, SignedInUser};
use crate::services::session::Session;

#[derive(Debug)]
pub enum Resolution {
    Authenticated {
        user: SignedInUser,
        source: AuthSource,
    },
    Anonymous,
    Rejected(IdentityError),
}

pub async fn resolve(
    identity: &dyn IdentityQuery,
    session: &Session,
    headers: &HeaderMap,
    uri: &Uri,
) -> Resolution {
    if let Some(user_id) = extract_session_user_id(session).await {
        return match identity.lookup_user_by_id(user_id).await {
            Ok(user) => Resolution::Authenticated {
                user,
                source: AuthSource::Session,
            },
            Err(err) => {
                // dangling session: demote to anonymous instead of denying service
                tracing::warn!(user_id = %user_id, error = %err, "failed to get user by id");
                Resolution::Anonymous
            }
        };
    }

    let Some(key) = extract_api_key(headers, uri) else {
        return Resolution::Anonymous;
    };

    match identity.lookup_api_key_by_value(&key).await {
        Ok(info) => {
            tracing::debug!(
                api_key_id = %info.id,
                account_id = %info.account_id,
                "api key accepted"
            );
            Resolution::Authenticated {
                user: SignedInUser::from_api_key(&info),
                source: AuthSource::ApiKey,
            }
        }
        Err(err) => {
            tracing::warn!(
                key_fingerprint = %key_fingerprint(&key),
                error = %err,
                "invalid api key"
            );
            Resolution::Rejected(err)
        }
    }
}

// Short hex prefix of sha256(key); enough to correlate log lines without leaking the key.
fn key_fingerprint(key: &str) -> String {
    Sha256::digest(key.as_bytes())
        .iter()
        .take(6)
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_short() {
        let a = key_fingerprint("secret-key");
        assert_eq!(a.len(), 12);
        assert_eq!(a, key_fingerprint("secret-key"));
        assert_ne!(a, key_fingerprint("other-key"));
        assert!(!a.contains("secret"));
    }
}
