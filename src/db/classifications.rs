use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Classification;

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    image: &str,
) -> Result<Classification, sqlx::Error> {
    sqlx::query_as::<_, Classification>(
        "INSERT INTO classifications (id, user_id, image) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(user_id)
    .bind(image)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Classification>, sqlx::Error> {
    sqlx::query_as::<_, Classification>("SELECT * FROM classifications WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Lists classifications, optionally restricted to one owner and/or status.
pub async fn list(
    pool: &PgPool,
    user_id: Option<Uuid>,
    status: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Classification>, i64), sqlx::Error> {
    let rows = sqlx::query_as::<_, Classification>(
        "SELECT * FROM classifications
         WHERE ($1::uuid IS NULL OR user_id = $1)
           AND ($2::text IS NULL OR status = $2)
         ORDER BY created_at DESC LIMIT $3 OFFSET $4",
    )
    .bind(user_id)
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM classifications
         WHERE ($1::uuid IS NULL OR user_id = $1)
           AND ($2::text IS NULL OR status = $2)",
    )
    .bind(user_id)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok((rows, total.0))
}
