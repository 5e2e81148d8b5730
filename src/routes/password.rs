use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::broker::{BrokerStatus, PasswordBroker};
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::response::ApiResponse;
use crate::state::SharedState;
use crate::validation::{normalize_email, Validator};

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize)]
pub struct ValidateTokenRequest {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub id: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub password_confirmation: Option<String>,
}

const UNKNOWN_EMAIL: &str = "We can't find a user with that email address.";

pub async fn forgot_password(
    State(state): State<SharedState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<ApiResponse<()>, AppError> {
    let email = normalize_email(&req.email);

    let mut v = Validator::new();
    v.email("email", &email);
    if !v.has("email") && !db::users::email_taken(&state.pool, &email).await? {
        v.add("email", UNKNOWN_EMAIL);
    }
    v.finish()?;

    match PasswordBroker::new(&state).send_reset_link(&email).await? {
        BrokerStatus::ResetLinkSent => Ok(ApiResponse::message("passwords.sent")),
        other => {
            tracing::warn!(status = ?other, "password reset link not sent");
            Err(AppError::failure("passwords.too_many_attempts"))
        }
    }
}

pub async fn validate_reset_token(
    State(state): State<SharedState>,
    Json(req): Json<ValidateTokenRequest>,
) -> Result<ApiResponse<()>, AppError> {
    let mut v = Validator::new();
    v.required("token", &req.token).required("id", &req.id);
    v.finish()?;

    let user_id: Uuid = req
        .id
        .trim()
        .parse()
        .map_err(|_| AppError::invalid_field("id", "The id must be a valid UUID."))?;
    let user = db::users::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("users.not_found"))?;

    if PasswordBroker::new(&state).token_matches(&user, &req.token).await? {
        Ok(ApiResponse::message("passwords.token_valid"))
    } else {
        Err(AppError::bad_request("passwords.token_invalid"))
    }
}

pub async fn reset_password(
    State(state): State<SharedState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<ApiResponse<()>, AppError> {
    let email = normalize_email(&req.email);

    let mut v = Validator::new();
    v.required("token", &req.token)
        .email("email", &email)
        .password("password", &req.password)
        .confirmed("password", &req.password, req.password_confirmation.as_deref());
    v.finish()?;

    let user = db::users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::invalid_field("email", UNKNOWN_EMAIL))?;

    let broker = PasswordBroker::new(&state);
    if !broker.token_matches(&user, &req.token).await? {
        return Err(AppError::bad_request("passwords.token_invalid"));
    }

    if password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)? {
        return Err(AppError::unprocessable("passwords.same_as_old"));
    }

    match broker.reset(&email, &req.token, &req.password).await? {
        BrokerStatus::PasswordReset => Ok(ApiResponse::message("passwords.reset")),
        other => {
            tracing::warn!(user_id = %user.id, status = ?other, "password reset rejected by broker");
            Err(AppError::failure("passwords.too_many_attempts"))
        }
    }
}
