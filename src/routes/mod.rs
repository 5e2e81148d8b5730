pub mod auth;
pub mod classifications;
pub mod feedback;
pub mod password;
pub mod roles;
pub mod users;
pub mod verification;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn auth_routes() -> Router<SharedState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route(
            "/auth/email/verify-email/{id}/{hash}",
            get(verification::verify_email),
        )
        .route(
            "/auth/email/resend-verify-email",
            post(verification::resend),
        )
        .route("/auth/forgot-password", post(password::forgot_password))
        .route("/auth/reset-password", post(password::reset_password))
        .route(
            "/auth/validation-reset-password",
            post(password::validate_reset_token),
        )
        // Authenticated
        .route("/auth/me", get(auth::me))
        .route("/auth/profile", put(auth::update_profile))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/refresh", post(auth::refresh))
}

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/feedback", post(feedback::create))
        .route(
            "/classifications",
            get(classifications::list_own).post(classifications::submit),
        )
        .route("/classifications/{id}", get(classifications::get_own))
}

pub fn admin_routes() -> Router<SharedState> {
    Router::new()
        // Users
        .route("/admin/users", get(users::list))
        .route("/admin/users/{id}", get(users::get))
        .route("/admin/users/{id}/status", put(users::update_status))
        .route("/admin/users/{id}/roles", put(users::update_roles))
        // Roles
        .route("/admin/roles", get(roles::list).post(roles::create))
        .route(
            "/admin/roles/{id}",
            put(roles::update).delete(roles::delete),
        )
        .route("/admin/permissions", get(roles::list_permissions))
        // Feedback
        .route("/admin/feedback", get(feedback::list))
        .route("/admin/feedback/{id}", axum::routing::delete(feedback::delete))
        // Classifications
        .route("/admin/classifications", get(classifications::admin_list))
        .route(
            "/admin/classifications/{id}",
            get(classifications::admin_get),
        )
}
