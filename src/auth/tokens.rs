use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::crypto;
use crate::db;

/// The two kinds of personal access token, stored under their `name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Access => "access_token",
            TokenKind::Refresh => "refresh_token",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "access_token" => Some(TokenKind::Access),
            "refresh_token" => Some(TokenKind::Refresh),
            _ => None,
        }
    }
}

/// A freshly minted token. The plaintext exists only here; the database
/// keeps its sha256.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub async fn issue<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    kind: TokenKind,
    ttl_secs: i64,
) -> Result<IssuedToken, sqlx::Error> {
    let token = crypto::random_token();
    let expires_at = Utc::now() + Duration::seconds(ttl_secs);

    db::access_tokens::create(
        executor,
        user_id,
        kind.name(),
        &crypto::sha256_hex(&token),
        expires_at,
    )
    .await?;

    tracing::debug!(%user_id, kind = kind.name(), "token issued");
    Ok(IssuedToken { token, expires_at })
}

/// Deletes every token of `kind` for the user, then issues a new one.
///
/// Runs under a lock on the user row, so concurrent rotations serialize and
/// exactly one token of `kind` survives.
pub async fn rotate(
    pool: &PgPool,
    user_id: Uuid,
    kind: TokenKind,
    ttl_secs: i64,
) -> Result<IssuedToken, sqlx::Error> {
    let mut tx = pool.begin().await?;
    if !db::users::lock(&mut tx, user_id).await? {
        return Err(sqlx::Error::RowNotFound);
    }

    let revoked = db::access_tokens::delete_named_for_user(&mut *tx, user_id, kind.name()).await?;
    let issued = issue(&mut *tx, user_id, kind, ttl_secs).await?;
    tx.commit().await?;

    tracing::debug!(%user_id, kind = kind.name(), revoked, "token rotated");
    Ok(issued)
}

pub async fn revoke_all<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
) -> Result<u64, sqlx::Error> {
    db::access_tokens::delete_all_for_user(executor, user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip() {
        for kind in [TokenKind::Access, TokenKind::Refresh] {
            assert_eq!(TokenKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(TokenKind::from_name("api_key"), None);
    }
}
