use async_trait::async_trait;

use crate::services::cache::CacheError;

/// Session backend keyed by the cookie-carried session id.
///
/// - `Ok(Some(v))`: value present
/// - `Ok(None)`: unknown session or key
/// - `Err(_)`: backend failure (the accessor treats it as absent)
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str, key: &str) -> Result<Option<String>, SessionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Cache(#[from] CacheError),
}
