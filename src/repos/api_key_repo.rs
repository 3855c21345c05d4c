/*
 * Responsibility
 * - api_keys lookup by key hash (the raw key is never stored)
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, FromRow)]
pub struct ApiKeyRow {
    pub id: i64,
    pub account_id: i64,
    pub role: String,
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct ApiKeyRepo {
    pool: PgPool,
}

impl ApiKeyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // key_hash: sha256(key) as stored in the BYTEA column
    pub async fn get_by_hash(&self, key_hash: &[u8]) -> RepoResult<Option<ApiKeyRow>> {
        let row = sqlx::query_as::<_, ApiKeyRow>(
            r#"
            SELECT id, account_id, role, name
            FROM api_keys
            WHERE key_hash = $1
            "#,
        )
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
