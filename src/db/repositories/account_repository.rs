use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{Account, DatabaseError};

pub struct AccountRepository;

impl AccountRepository {
    pub async fn get_account(
        pool: &PgPool,
        account_id: Uuid,
    ) -> Result<Option<Account>, DatabaseError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, display_name, role, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

    /// Resolve an opaque bearer token to its account. Token issuance lives
    /// outside this service; here a token is only a lookup key.
    pub async fn resolve_token(pool: &PgPool, token: &str) -> Result<Option<Account>, DatabaseError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT a.id, a.email, a.display_name, a.role, a.created_at, a.updated_at
            FROM accounts a
            JOIN access_tokens t ON t.account_id = a.id
            WHERE t.token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }
}
