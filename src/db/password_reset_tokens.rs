use sqlx::PgPool;

use crate::models::PasswordResetToken;

/// Inserts or replaces the reset row for `email`.
pub async fn upsert(
    pool: &PgPool,
    email: &str,
    token_hash: &str,
) -> Result<PasswordResetToken, sqlx::Error> {
    sqlx::query_as::<_, PasswordResetToken>(
        "INSERT INTO password_reset_tokens (email, token_hash)
         VALUES ($1, $2)
         ON CONFLICT (email) DO UPDATE
         SET token_hash = EXCLUDED.token_hash, created_at = now()
         RETURNING *",
    )
    .bind(email)
    .bind(token_hash)
    .fetch_one(pool)
    .await
}

pub async fn find_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<PasswordResetToken>, sqlx::Error> {
    sqlx::query_as::<_, PasswordResetToken>("SELECT * FROM password_reset_tokens WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Locks the reset row for `email` until the surrounding transaction ends.
pub async fn find_by_email_for_update(
    conn: &mut sqlx::PgConnection,
    email: &str,
) -> Result<Option<PasswordResetToken>, sqlx::Error> {
    sqlx::query_as::<_, PasswordResetToken>(
        "SELECT * FROM password_reset_tokens WHERE email = $1 FOR UPDATE",
    )
    .bind(email)
    .fetch_optional(&mut *conn)
    .await
}

pub async fn delete_by_email<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    email: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM password_reset_tokens WHERE email = $1")
        .bind(email)
        .execute(executor)
        .await?;
    Ok(())
}
