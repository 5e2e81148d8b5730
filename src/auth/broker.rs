//! Password reset broker: issues, checks and consumes reset tokens.
//!
//! Results are reported as [`BrokerStatus`] values; callers treat anything
//! other than the expected success status as a failure.

use chrono::{Duration, Utc};

use crate::auth::{password, tokens};
use crate::crypto;
use crate::db;
use crate::email;
use crate::error::AppError;
use crate::events::{self, AuthEvent};
use crate::models::User;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrokerStatus {
    ResetLinkSent,
    ResetThrottled,
    InvalidUser,
    InvalidToken,
    PasswordReset,
}

pub struct PasswordBroker<'a> {
    state: &'a AppState,
}

impl<'a> PasswordBroker<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn send_reset_link(&self, email: &str) -> Result<BrokerStatus, AppError> {
        let pool = &self.state.pool;
        let Some(user) = db::users::find_by_email(pool, email).await? else {
            return Ok(BrokerStatus::InvalidUser);
        };

        if let Some(existing) = db::password_reset_tokens::find_by_email(pool, &user.email).await? {
            let throttle = Duration::seconds(self.state.config.tokens.reset_throttle);
            if existing.created_at + throttle > Utc::now() {
                return Ok(BrokerStatus::ResetThrottled);
            }
        }

        let token = crypto::random_token();
        let token_hash = password::hash(&token).map_err(AppError::Internal)?;
        db::password_reset_tokens::upsert(pool, &user.email, &token_hash).await?;

        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("token", &token)
            .append_pair("email", &user.email)
            .finish();
        let reset_url = format!("{}/reset-password?{query}", self.state.config.base_url);
        let expires_minutes = self.state.config.tokens.reset_ttl / 60;
        email::send_password_reset(self.state.mailer.as_ref(), &user.email, &reset_url, expires_minutes)
            .await
            .map_err(AppError::Internal)?;

        tracing::info!(user_id = %user.id, "password reset link sent");
        Ok(BrokerStatus::ResetLinkSent)
    }

    /// Hash comparison against the stored row only; expiry is not considered.
    pub async fn token_matches(&self, user: &User, token: &str) -> Result<bool, AppError> {
        let Some(row) = db::password_reset_tokens::find_by_email(&self.state.pool, &user.email).await?
        else {
            return Ok(false);
        };
        password::verify(token, &row.token_hash).map_err(AppError::Internal)
    }

    pub async fn reset(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> Result<BrokerStatus, AppError> {
        let pool = &self.state.pool;
        let Some(user) = db::users::find_by_email(pool, email).await? else {
            return Ok(BrokerStatus::InvalidUser);
        };

        // The row stays locked until commit, so a token is consumed at most once.
        let mut tx = pool.begin().await?;
        let Some(row) =
            db::password_reset_tokens::find_by_email_for_update(&mut tx, &user.email).await?
        else {
            return Ok(BrokerStatus::InvalidToken);
        };

        let ttl = Duration::seconds(self.state.config.tokens.reset_ttl);
        let expired = row.created_at + ttl < Utc::now();
        if expired || !password::verify(token, &row.token_hash).map_err(AppError::Internal)? {
            return Ok(BrokerStatus::InvalidToken);
        }

        let pw_hash = password::hash(new_password).map_err(AppError::Internal)?;
        db::users::update_password(&mut *tx, user.id, &pw_hash).await?;
        db::password_reset_tokens::delete_by_email(&mut *tx, &user.email).await?;
        tokens::revoke_all(&mut *tx, user.id).await?;
        tx.commit().await?;

        events::dispatch(self.state, AuthEvent::PasswordReset(user)).await;
        Ok(BrokerStatus::PasswordReset)
    }
}
