use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::verification;
use crate::db;
use crate::error::AppError;
use crate::events::{self, AuthEvent};
use crate::response::ApiResponse;
use crate::state::SharedState;
use crate::validation::{normalize_email, Validator};

#[derive(Deserialize)]
pub struct SignedQuery {
    pub expires: Option<String>,
    pub signature: Option<String>,
}

#[derive(Deserialize)]
pub struct ResendRequest {
    #[serde(default)]
    pub email: String,
}

pub async fn verify_email(
    State(state): State<SharedState>,
    Path((id, hash)): Path<(String, String)>,
    Query(query): Query<SignedQuery>,
) -> Result<ApiResponse<()>, AppError> {
    let expires = query.expires.as_deref().and_then(|e| e.parse::<i64>().ok());
    let signed = verification::has_valid_signature(
        &state.config.app_key,
        &id,
        &hash,
        expires,
        query.signature.as_deref(),
        Utc::now().timestamp(),
    );
    if !signed {
        tracing::warn!(%id, "verification link with invalid signature");
        return Err(AppError::forbidden("verify.invalid_signature"));
    }

    let user_id: Uuid = id
        .parse()
        .map_err(|_| AppError::not_found("users.not_found"))?;
    let user = db::users::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("users.not_found"))?;

    if !verification::hash_matches(&user, &hash) {
        return Err(AppError::forbidden("verify.invalid_hash"));
    }

    if user.is_verified() {
        return Err(AppError::conflict("verify.already_verified"));
    }

    if !db::users::mark_verified(&state.pool, user.id).await? {
        return Err(AppError::conflict("verify.already_verified"));
    }

    let user = db::users::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::not_found("users.not_found"))?;
    events::dispatch(&state, AuthEvent::Verified(user)).await;

    Ok(ApiResponse::message("verify.verified"))
}

pub async fn resend(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(req): Json<ResendRequest>,
) -> Result<ApiResponse<()>, AppError> {
    state.verify_resend_limiter.check(addr.ip())?;

    let email = normalize_email(&req.email);
    Validator::new().email("email", &email).finish()?;

    let user = db::users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::not_found("verify.user_not_found"))?;

    if user.is_verified() {
        return Err(AppError::conflict("verify.already_verified"));
    }

    events::send_verification_link(&state, &user).await;
    Ok(ApiResponse::message("verify.sent"))
}
