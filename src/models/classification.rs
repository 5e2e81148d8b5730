use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An image submitted for classification. `status` and `result` are written
/// by the external classifier.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Classification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub image: String,
    pub status: String,
    pub result: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const STATUSES: &[&str] = &["pending", "processing", "completed", "failed"];
