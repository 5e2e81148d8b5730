use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Feedback {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub rating: Option<i16>,
    pub created_at: DateTime<Utc>,
}

/// Feedback row joined with the author's email for the admin listing.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct FeedbackEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_email: String,
    pub content: String,
    pub rating: Option<i16>,
    pub created_at: DateTime<Utc>,
}
