use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Feedback, FeedbackEntry};

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    content: &str,
    rating: Option<i16>,
) -> Result<Feedback, sqlx::Error> {
    sqlx::query_as::<_, Feedback>(
        "INSERT INTO feedback (id, user_id, content, rating)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(user_id)
    .bind(content)
    .bind(rating)
    .fetch_one(pool)
    .await
}

pub async fn list(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<(Vec<FeedbackEntry>, i64), sqlx::Error> {
    let rows = sqlx::query_as::<_, FeedbackEntry>(
        "SELECT f.id, f.user_id, u.email AS user_email, f.content, f.rating, f.created_at
         FROM feedback f JOIN users u ON u.id = f.user_id
         ORDER BY f.created_at DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM feedback")
        .fetch_one(pool)
        .await?;

    Ok((rows, total.0))
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
