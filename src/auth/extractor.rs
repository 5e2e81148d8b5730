use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::RequestPartsExt;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use uuid::Uuid;

use crate::auth::tokens::TokenKind;
use crate::crypto;
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

/// The user behind a live access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    pub token_id: Uuid,
    pub token_kind: TokenKind,
    pub permissions: Vec<String>,
}

impl AuthUser {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    pub fn can(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    pub fn require_permission(&self, permission: &str) -> Result<(), AppError> {
        if self.can(permission) {
            Ok(())
        } else {
            tracing::debug!(user_id = %self.user.id, permission, "permission denied");
            Err(AppError::forbidden("forbidden"))
        }
    }
}

/// Like [`AuthUser`] but also accepts a refresh token. Only the refresh
/// endpoint takes this.
#[derive(Debug, Clone)]
pub struct RefreshingUser(pub AuthUser);

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state, &[TokenKind::Access]).await
    }
}

impl FromRequestParts<SharedState> for RefreshingUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state, &[TokenKind::Access, TokenKind::Refresh])
            .await
            .map(RefreshingUser)
    }
}

async fn authenticate(
    parts: &mut Parts,
    state: &SharedState,
    accepted: &[TokenKind],
) -> Result<AuthUser, AppError> {
    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| AppError::unauthorized("auth.unauthenticated"))?;

    let token_hash = crypto::sha256_hex(bearer.token());

    let token = db::access_tokens::find_live_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| AppError::unauthorized("auth.unauthenticated"))?;

    let kind = TokenKind::from_name(&token.name)
        .filter(|kind| accepted.contains(kind))
        .ok_or_else(|| AppError::unauthorized("auth.unauthenticated"))?;

    let user = db::users::find_by_id(&state.pool, token.user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("auth.unauthenticated"))?;

    db::access_tokens::touch(&state.pool, token.id).await?;

    let permissions = db::roles::permission_names_for_user(&state.pool, user.id).await?;

    Ok(AuthUser {
        user,
        token_id: token.id,
        token_kind: kind,
        permissions,
    })
}
