//! Identity lookup interface consumed by the context middleware.
//!
//! Implementations may be in-process, networked, or test doubles.
//! They are shared across concurrent requests and must be safe for that.
use async_trait::async_trait;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::identity::types::{ApiKeyInfo, SignedInUser, UserId};

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("user not found")]
    UserNotFound,

    #[error("api key not found")]
    ApiKeyNotFound,

    #[error("invalid identity record: {0}")]
    InvalidRecord(String),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[async_trait]
pub trait IdentityQuery: Send + Sync {
    async fn lookup_user_by_id(&self, user_id: UserId) -> Result<SignedInUser, IdentityError>;

    async fn lookup_api_key_by_value(&self, key: &str) -> Result<ApiKeyInfo, IdentityError>;
}
