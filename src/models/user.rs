use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub avatar: Option<String>,
    pub is_active: bool,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

/// A user as returned to clients, with roles and effective permissions.
#[derive(Debug, Clone, Serialize)]
pub struct UserResource {
    pub id: Uuid,
    pub email: String,
    pub avatar: Option<String>,
    pub is_active: bool,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl UserResource {
    pub fn new(user: User, roles: Vec<String>, permissions: Vec<String>) -> Self {
        Self {
            id: user.id,
            email: user.email,
            avatar: user.avatar,
            is_active: user.is_active,
            email_verified_at: user.email_verified_at,
            roles,
            permissions,
            created_at: user.created_at,
        }
    }
}
