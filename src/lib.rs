pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod crypto;
pub mod db;
pub mod email;
pub mod error;
pub mod events;
pub mod messages;
pub mod models;
pub mod rate_limit;
pub mod response;
pub mod routes;
pub mod state;
pub mod validation;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::email::{LogMailer, Mailer, SmtpMailer};
use crate::rate_limit::Throttle;
use crate::state::{AppState, SharedState};

/// Requests per minute per IP on the resend-verification route.
pub const VERIFY_RESEND_PER_MINUTE: u32 = 6;

pub fn build_app(pool: PgPool, config: Config) -> (Router, SharedState) {
    let mailer: Arc<dyn Mailer> = match config.smtp.as_ref().map(SmtpMailer::new) {
        Some(Ok(mailer)) => {
            tracing::info!("SMTP configured");
            Arc::new(mailer)
        }
        Some(Err(e)) => {
            tracing::warn!("SMTP not available: {e}");
            Arc::new(LogMailer)
        }
        None => {
            tracing::warn!("SMTP not configured, mail will be logged");
            Arc::new(LogMailer)
        }
    };

    build_app_with_mailer(pool, config, mailer)
}

pub fn build_app_with_mailer(
    pool: PgPool,
    config: Config,
    mailer: Arc<dyn Mailer>,
) -> (Router, SharedState) {
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState {
        pool,
        config,
        mailer,
        verify_resend_limiter: Throttle::per_minute(VERIFY_RESEND_PER_MINUTE),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Body limit stays outermost: CorsLayer cannot wrap its response body.
    let layers = ServiceBuilder::new()
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let app = Router::new()
        .merge(routes::auth_routes())
        .merge(routes::api_routes())
        .merge(routes::admin_routes())
        .route("/health", axum::routing::get(health))
        .layer(layers)
        .with_state(state.clone());

    (app, state)
}

async fn health() -> &'static str {
    "ok"
}
