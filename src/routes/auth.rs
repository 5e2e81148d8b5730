use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::extractor::{AuthUser, RefreshingUser};
use crate::auth::password;
use crate::auth::tokens::{self, TokenKind};
use crate::db;
use crate::error::AppError;
use crate::events::{self, AuthEvent};
use crate::models::UserResource;
use crate::response::ApiResponse;
use crate::state::SharedState;
use crate::validation::{normalize_email, Validator};

pub const LOGIN_PERMISSION: &str = "login_mobile";

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub password_confirmation: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub avatar: Option<String>,
    pub current_password: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token_type: &'static str,
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_token_expires_at: DateTime<Utc>,
    pub user: UserResource,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub token_type: &'static str,
    pub access_token: String,
    pub access_token_expires_at: DateTime<Utc>,
}

const EMAIL_TAKEN: &str = "The email has already been taken.";

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<ApiResponse<UserResource>, AppError> {
    let email = normalize_email(&req.email);
    let avatar = req.avatar.as_deref().map(str::trim).filter(|a| !a.is_empty());

    let mut v = Validator::new();
    v.email("email", &email)
        .password("password", &req.password)
        .confirmed("password", &req.password, req.password_confirmation.as_deref());
    if let Some(avatar) = avatar {
        v.max_len("avatar", avatar, 2048);
    }
    if !v.has("email") && db::users::email_taken(&state.pool, &email).await? {
        v.add("email", EMAIL_TAKEN);
    }
    v.finish()?;

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let mut tx = state.pool.begin().await?;
    let role = db::roles::ensure(&mut *tx, &state.config.default_role).await?;
    let user = db::users::create(&mut *tx, &email, &pw_hash, avatar)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::invalid_field("email", EMAIL_TAKEN)
            }
            other => other.into(),
        })?;
    db::roles::assign_to_user(&mut *tx, user.id, role.id).await?;
    tx.commit().await?;

    events::dispatch(&state, AuthEvent::Registered(user.clone())).await;

    let resource = db::users::resource(&state.pool, user).await?;
    Ok(ApiResponse::created("auth.registered", resource))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    let email = normalize_email(&req.email);

    let user = db::users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::unauthorized("auth.failed"))?;

    let valid = password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)?;
    if !valid {
        tracing::info!(user_id = %user.id, "login failed: bad password");
        return Err(AppError::unauthorized("auth.failed"));
    }

    if !user.is_active {
        return Err(AppError::forbidden("auth.inactive"));
    }

    let permissions = db::roles::permission_names_for_user(&state.pool, user.id).await?;
    if !permissions.iter().any(|p| p == LOGIN_PERMISSION) {
        return Err(AppError::forbidden("auth.no_permission"));
    }

    let ttl = &state.config.tokens;
    let access = tokens::issue(&state.pool, user.id, TokenKind::Access, ttl.access_ttl).await?;
    let refresh = tokens::issue(&state.pool, user.id, TokenKind::Refresh, ttl.refresh_ttl).await?;

    tracing::info!(user_id = %user.id, remember = req.remember, "user logged in");

    let resource = db::users::resource(&state.pool, user).await?;
    Ok(ApiResponse::ok(
        "auth.login_success",
        LoginResponse {
            token_type: "Bearer",
            access_token: access.token,
            access_token_expires_at: access.expires_at,
            refresh_token: refresh.token,
            refresh_token_expires_at: refresh.expires_at,
            user: resource,
        },
    ))
}

pub async fn refresh(
    State(state): State<SharedState>,
    RefreshingUser(auth): RefreshingUser,
) -> Result<ApiResponse<RefreshResponse>, AppError> {
    let access = tokens::rotate(
        &state.pool,
        auth.user_id(),
        TokenKind::Access,
        state.config.tokens.access_ttl,
    )
    .await?;

    tracing::debug!(user_id = %auth.user_id(), via = auth.token_kind.name(), "access token refreshed");

    Ok(ApiResponse::ok(
        "auth.refreshed",
        RefreshResponse {
            token_type: "Bearer",
            access_token: access.token,
            access_token_expires_at: access.expires_at,
        },
    ))
}

pub async fn logout(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<ApiResponse<()>, AppError> {
    let revoked = tokens::revoke_all(&state.pool, auth.user_id()).await?;
    tracing::info!(user_id = %auth.user_id(), revoked, "user logged out");
    Ok(ApiResponse::message("auth.logged_out"))
}

pub async fn me(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<ApiResponse<UserResource>, AppError> {
    let resource = db::users::resource(&state.pool, auth.user).await?;
    Ok(ApiResponse::ok("auth.me", resource))
}

pub async fn update_profile(
    State(state): State<SharedState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<ApiResponse<UserResource>, AppError> {
    let user = auth.user;

    let mut v = Validator::new();
    if let Some(avatar) = req.avatar.as_deref() {
        v.max_len("avatar", avatar, 2048);
    }
    if let Some(new_password) = req.password.as_deref() {
        v.password("password", new_password).confirmed(
            "password",
            new_password,
            req.password_confirmation.as_deref(),
        );
        let current = req.current_password.as_deref().unwrap_or_default();
        v.required("current_password", current);
        if !v.has("current_password")
            && !password::verify(current, &user.password_hash).map_err(AppError::Internal)?
        {
            v.add("current_password", crate::messages::t("auth.current_password_incorrect"));
        }
    }
    v.finish()?;

    if let Some(new_password) = req.password.as_deref() {
        if password::verify(new_password, &user.password_hash).map_err(AppError::Internal)? {
            return Err(AppError::unprocessable("passwords.same_as_old"));
        }
    }

    if let Some(avatar) = req.avatar.as_deref() {
        let avatar = Some(avatar.trim()).filter(|a| !a.is_empty());
        db::users::update_avatar(&state.pool, user.id, avatar).await?;
    }

    if let Some(new_password) = req.password.as_deref() {
        let pw_hash = password::hash(new_password).map_err(AppError::Internal)?;
        db::users::update_password(&state.pool, user.id, &pw_hash).await?;
        tracing::info!(user_id = %user.id, "password changed from profile");
    }

    let user = db::users::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::not_found("users.not_found"))?;
    let resource = db::users::resource(&state.pool, user).await?;
    Ok(ApiResponse::ok("auth.profile_updated", resource))
}
