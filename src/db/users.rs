use sqlx::PgPool;
use uuid::Uuid;

use crate::db::roles;
use crate::models::{User, UserResource};

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    email: &str,
    password_hash: &str,
    avatar: Option<&str>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (id, email, password_hash, avatar)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(email)
    .bind(password_hash)
    .bind(avatar)
    .fetch_one(executor)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn email_taken<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    email: &str,
) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(executor)
        .await?;
    Ok(row.0)
}

/// Case-insensitive search on email, optionally filtered by active flag.
pub async fn search(
    pool: &PgPool,
    search: Option<&str>,
    active: Option<bool>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<User>, i64), sqlx::Error> {
    let pattern = search.map(|s| format!("%{}%", s.to_lowercase()));

    let users = sqlx::query_as::<_, User>(
        "SELECT * FROM users
         WHERE ($1::text IS NULL OR email LIKE $1)
           AND ($2::bool IS NULL OR is_active = $2)
         ORDER BY created_at DESC LIMIT $3 OFFSET $4",
    )
    .bind(&pattern)
    .bind(active)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM users
         WHERE ($1::text IS NULL OR email LIKE $1)
           AND ($2::bool IS NULL OR is_active = $2)",
    )
    .bind(&pattern)
    .bind(active)
    .fetch_one(pool)
    .await?;

    Ok((users, total.0))
}

pub async fn update_password<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(password_hash)
        .execute(executor)
        .await?;
    Ok(())
}

/// Row-locks the user for the rest of the transaction. Returns false when
/// the user does not exist.
pub async fn lock(conn: &mut sqlx::PgConnection, id: Uuid) -> Result<bool, sqlx::Error> {
    let row: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.is_some())
}

pub async fn update_avatar(
    pool: &PgPool,
    id: Uuid,
    avatar: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET avatar = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(avatar)
        .execute(pool)
        .await?;
    Ok(())
}

/// Sets `email_verified_at` unless already set. Returns whether a row changed.
pub async fn mark_verified(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE users SET email_verified_at = now(), updated_at = now()
         WHERE id = $1 AND email_verified_at IS NULL",
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn set_active(pool: &PgPool, id: Uuid, active: bool) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET is_active = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(active)
        .execute(pool)
        .await?;
    Ok(())
}

/// Loads roles and effective permissions to build the client-facing view.
pub async fn resource(pool: &PgPool, user: User) -> Result<UserResource, sqlx::Error> {
    let role_names = roles::role_names_for_user(pool, user.id).await?;
    let permissions = roles::permission_names_for_user(pool, user.id).await?;
    Ok(UserResource::new(user, role_names, permissions))
}
