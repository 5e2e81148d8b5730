use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::tokens;
use crate::db;
use crate::error::AppError;
use crate::models::UserResource;
use crate::response::{page_bounds, ApiResponse, Paginated};
use crate::state::SharedState;

pub const MANAGE_PERMISSION: &str = "manage_users";

#[derive(Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub active: Option<bool>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Deserialize)]
pub struct UpdateStatus {
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct UpdateRoles {
    #[serde(default)]
    pub roles: Vec<String>,
}

pub async fn list(
    State(state): State<SharedState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<ApiResponse<Paginated<UserResource>>, AppError> {
    auth.require_permission(MANAGE_PERMISSION)?;

    let (page, per_page, offset) = page_bounds(query.page, query.per_page);
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let (users, total) =
        db::users::search(&state.pool, search, query.active, per_page, offset).await?;

    let mut items = Vec::with_capacity(users.len());
    for user in users {
        items.push(db::users::resource(&state.pool, user).await?);
    }

    Ok(ApiResponse::ok("ok", Paginated { items, total, page, per_page }))
}

pub async fn get(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<UserResource>, AppError> {
    auth.require_permission(MANAGE_PERMISSION)?;

    let user = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("users.not_found"))?;
    Ok(ApiResponse::ok("ok", db::users::resource(&state.pool, user).await?))
}

/// Activates or deactivates an account. Deactivation revokes its tokens.
pub async fn update_status(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatus>,
) -> Result<ApiResponse<UserResource>, AppError> {
    auth.require_permission(MANAGE_PERMISSION)?;

    if id == auth.user_id() && !req.is_active {
        return Err(AppError::invalid_field(
            "is_active",
            "You cannot deactivate your own account.",
        ));
    }

    let user = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("users.not_found"))?;

    db::users::set_active(&state.pool, user.id, req.is_active).await?;
    if !req.is_active {
        tokens::revoke_all(&state.pool, user.id).await?;
    }
    tracing::info!(user_id = %user.id, by = %auth.user_id(), active = req.is_active, "user status changed");

    let user = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("users.not_found"))?;
    Ok(ApiResponse::ok("updated", db::users::resource(&state.pool, user).await?))
}

pub async fn update_roles(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRoles>,
) -> Result<ApiResponse<UserResource>, AppError> {
    auth.require_permission(MANAGE_PERMISSION)?;

    let user = db::users::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("users.not_found"))?;

    let roles = db::roles::find_by_names(&state.pool, &req.roles).await?;
    let unknown: Vec<&str> = req
        .roles
        .iter()
        .filter(|name| !roles.iter().any(|r| &r.name == *name))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        return Err(AppError::invalid_field(
            "roles",
            format!("Unknown role(s): {}.", unknown.join(", ")),
        ));
    }

    let role_ids: Vec<Uuid> = roles.iter().map(|r| r.id).collect();
    let mut tx = state.pool.begin().await?;
    db::roles::sync_user_roles(&mut tx, user.id, &role_ids).await?;
    tx.commit().await?;

    tracing::info!(user_id = %user.id, by = %auth.user_id(), roles = ?req.roles, "user roles updated");
    Ok(ApiResponse::ok("updated", db::users::resource(&state.pool, user).await?))
}
