/*
 * Responsibility
 * - request/response DTOs for /user
 */
use serde::{Deserialize, Serialize};

use crate::api::extractors::AuthSource;
use crate::services::identity::{AccountId, ApiKeyId, Role, SignedInUser, UserId};

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub user_id: Option<UserId>,
    pub account_id: AccountId,
    pub account_name: String,
    pub role: Role,
    pub login: String,
    pub name: String,
    pub email: String,
    pub is_server_admin: bool,
    pub api_key_id: Option<ApiKeyId>,
    pub auth_source: Option<AuthSource>,
}

impl CurrentUserResponse {
    pub fn new(user: &SignedInUser, auth_source: Option<AuthSource>) -> Self {
        Self {
            user_id: user.user_id,
            account_id: user.account_id,
            account_name: user.account_name.clone(),
            role: user.account_role,
            login: user.login.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            is_server_admin: user.is_server_admin,
            api_key_id: user.api_key_id,
            auth_source,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EchoRequest {
    pub message: String,
}

impl EchoRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.message.trim().is_empty() {
            return Err("message is required");
        }
        if self.message.len() > 1024 {
            return Err("message must be <= 1024 chars");
        }
        Ok(())
    }
}
