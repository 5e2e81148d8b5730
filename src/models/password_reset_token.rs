use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One outstanding reset request per email; `token_hash` is an argon2 hash.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct PasswordResetToken {
    pub email: String,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
}
