use std::sync::Arc;

use async_trait::async_trait;

use crate::services::{
    cache::{CacheClient, ValkeyClient},
    session::store::{SessionError, SessionStore},
};

/// Valkey-backed session store.
///
/// Each session is a hash at `{prefix}:{session_id}`; values are read with HGET.
/// Sessions are written by the login flow, never here.
#[derive(Clone)]
pub struct ValkeySessionStore<C: CacheClient> {
    cache: Arc<C>,
    prefix: String,
}

impl ValkeySessionStore<ValkeyClient> {
    pub async fn new(redis_url: &str, prefix: impl Into<String>) -> Result<Self, SessionError> {
        let client = ValkeyClient::new(redis_url).await?;

        Ok(Self {
            cache: Arc::new(client),
            prefix: prefix.into(),
        })
    }
}

impl<C: CacheClient> ValkeySessionStore<C> {
    pub fn new_with_cache(cache: Arc<C>, prefix: impl Into<String>) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, session_id: &str) -> String {
        format!("{}:{}", self.prefix, session_id)
    }
}

#[async_trait]
impl<C: CacheClient> SessionStore for ValkeySessionStore<C> {
    async fn get(&self, session_id: &str, key: &str) -> Result<Option<String>, SessionError> {
        let full_key = self.key(session_id);

        let value = self.cache.get_field(&full_key, key).await.map_err(|err| {
            tracing::debug!(
                backend = self.cache.backend_name(),
                error = %err,
                "session read failed"
            );
            err
        })?;

        Ok(value)
    }
}
