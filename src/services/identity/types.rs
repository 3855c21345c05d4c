/*
 * Responsibility
 * - Identity records as seen by the request context (read-only)
 * - Produced by an IdentityQuery backend, never mutated afterwards
 */
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

macro_rules! id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(UserId);
id_type!(AccountId);
id_type!(ApiKeyId);

/// Account-level permission carried by an identity.
/// This crate only carries it; checks live in handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Role {
    #[default]
    Viewer,
    Editor,
    Admin,
}

#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "viewer" => Ok(Role::Viewer),
            "editor" => Ok(Role::Editor),
            "admin" => Ok(Role::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Resolved identity attached to a request.
///
/// - `user_id` is `None` for API-key identities (account/role scoped, not user scoped)
/// - `api_key_id` is `Some` only when the identity came from an API key (audit)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignedInUser {
    pub user_id: Option<UserId>,
    pub account_id: AccountId,
    pub account_name: String,
    pub account_role: Role,
    pub login: String,
    pub name: String,
    pub email: String,
    pub is_server_admin: bool,
    pub api_key_id: Option<ApiKeyId>,
}

impl SignedInUser {
    /// Identity for a request authenticated by API key.
    /// Only the key's account and role are carried.
    pub fn from_api_key(key: &ApiKeyInfo) -> Self {
        Self {
            account_id: key.account_id,
            account_role: key.role,
            api_key_id: Some(key.id),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyInfo {
    pub id: ApiKeyId,
    pub account_id: AccountId,
    pub role: Role,
    pub name: String,
}
