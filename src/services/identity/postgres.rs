//! Postgres-backed IdentityQuery.
//!
//! API keys are looked up by `sha256(key)`; the raw key never reaches the DB.
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use sqlx::PgPool;

use crate::repos::{
    api_key_repo::{ApiKeyRepo, ApiKeyRow},
    user_repo::{SignedInUserRow, UserRepo},
};
use crate::services::identity::{
    query::{IdentityError, IdentityQuery},
    types::{AccountId, ApiKeyId, ApiKeyInfo, Role, SignedInUser, UserId},
};

#[derive(Clone, Debug)]
pub struct PgIdentityQuery {
    users: UserRepo,
    api_keys: ApiKeyRepo,
}

impl PgIdentityQuery {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepo::new(pool.clone()),
            api_keys: ApiKeyRepo::new(pool),
        }
    }
}

#[async_trait]
impl IdentityQuery for PgIdentityQuery {
    async fn lookup_user_by_id(&self, user_id: UserId) -> Result<SignedInUser, IdentityError> {
        let row = self
            .users
            .get_signed_in(user_id.0)
            .await?
            .ok_or(IdentityError::UserNotFound)?;

        signed_in_user_from_row(row)
    }

    async fn lookup_api_key_by_value(&self, key: &str) -> Result<ApiKeyInfo, IdentityError> {
        let row = self
            .api_keys
            .get_by_hash(&hash_api_key(key))
            .await?
            .ok_or(IdentityError::ApiKeyNotFound)?;

        api_key_from_row(row)
    }
}

pub fn hash_api_key(key: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.finalize().to_vec()
}

fn signed_in_user_from_row(row: SignedInUserRow) -> Result<SignedInUser, IdentityError> {
    let role = row
        .account_role
        .as_deref()
        .ok_or_else(|| {
            IdentityError::InvalidRecord(format!("user {} has no account membership", row.user_id))
        })?
        .parse::<Role>()
        .map_err(|e| IdentityError::InvalidRecord(e.to_string()))?;

    Ok(SignedInUser {
        user_id: Some(UserId(row.user_id)),
        account_id: AccountId(row.account_id),
        account_name: row.account_name.unwrap_or_default(),
        account_role: role,
        login: row.login,
        name: row.name,
        email: row.email,
        is_server_admin: row.is_admin,
        api_key_id: None,
    })
}

fn api_key_from_row(row: ApiKeyRow) -> Result<ApiKeyInfo, IdentityError> {
    let role = row
        .role
        .parse::<Role>()
        .map_err(|e| IdentityError::InvalidRecord(e.to_string()))?;

    Ok(ApiKeyInfo {
        id: ApiKeyId(row.id),
        account_id: AccountId(row.account_id),
        role,
        name: row.name,
    })
}
