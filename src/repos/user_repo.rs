/*
 * Responsibility
 * - Signed-in user lookup (users + account membership)
 * - Rows are returned raw; conversion to SignedInUser happens in the identity service
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, FromRow)]
pub struct SignedInUserRow {
    pub user_id: i64,
    pub account_id: i64,
    pub account_name: Option<String>,
    // LEFT JOIN: NULL when the user has no membership row in its current account
    pub account_role: Option<String>,
    pub login: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Clone, Debug)]
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_signed_in(&self, user_id: i64) -> RepoResult<Option<SignedInUserRow>> {
        let row = sqlx::query_as::<_, SignedInUserRow>(
            r#"
            SELECT
                u.id          AS user_id,
                u.account_id  AS account_id,
                a.name        AS account_name,
                au.role       AS account_role,
                u.login       AS login,
                u.name        AS name,
                u.email       AS email,
                u.is_admin    AS is_admin
            FROM users u
            LEFT JOIN account_users au
                ON au.account_id = u.account_id AND au.user_id = u.id
            LEFT JOIN accounts a
                ON a.id = u.account_id
            WHERE u.id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
