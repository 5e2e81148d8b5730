use crate::auth::verification;
use crate::email;
use crate::models::User;
use crate::state::AppState;

/// Account lifecycle events and the mail they trigger.
#[derive(Debug, Clone)]
pub enum AuthEvent {
    /// Sends the signed verification link.
    Registered(User),
    /// Sends the welcome mail.
    Verified(User),
    PasswordReset(User),
}

/// Runs the listeners for `event`. Listener failures are logged, never
/// returned: the triggering request has already succeeded.
pub async fn dispatch(state: &AppState, event: AuthEvent) {
    match event {
        AuthEvent::Registered(user) => {
            tracing::info!(user_id = %user.id, "user registered");
            send_verification_link(state, &user).await;
        }
        AuthEvent::Verified(user) => {
            tracing::info!(user_id = %user.id, "email verified");
            email::send_welcome(state.mailer.as_ref(), &user.email, &state.config.base_url).await;
        }
        AuthEvent::PasswordReset(user) => {
            tracing::info!(user_id = %user.id, "password reset");
        }
    }
}

pub async fn send_verification_link(state: &AppState, user: &User) {
    match verification::signed_url(&state.config, user) {
        Ok(url) => email::send_verification(state.mailer.as_ref(), &user.email, &url).await,
        Err(e) => tracing::error!("Failed to sign verification link: {e}"),
    }
}
