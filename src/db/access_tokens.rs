use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::AccessToken;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    name: &str,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<AccessToken, sqlx::Error> {
    sqlx::query_as::<_, AccessToken>(
        "INSERT INTO personal_access_tokens (id, user_id, name, token_hash, expires_at)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(user_id)
    .bind(name)
    .bind(token_hash)
    .bind(expires_at)
    .fetch_one(executor)
    .await
}

pub async fn find_live_by_hash(
    pool: &PgPool,
    token_hash: &str,
) -> Result<Option<AccessToken>, sqlx::Error> {
    sqlx::query_as::<_, AccessToken>(
        "SELECT * FROM personal_access_tokens
         WHERE token_hash = $1 AND expires_at > now()",
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await
}

pub async fn touch(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE personal_access_tokens SET last_used_at = now() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_named_for_user<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    name: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM personal_access_tokens WHERE user_id = $1 AND name = $2")
        .bind(user_id)
        .bind(name)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_all_for_user<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM personal_access_tokens WHERE user_id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Removes tokens past their expiry, whatever their kind.
pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM personal_access_tokens WHERE expires_at <= now()")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
