use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{Permission, RoleWithPermissions};
use crate::response::ApiResponse;
use crate::state::SharedState;
use crate::validation::Validator;

pub const MANAGE_PERMISSION: &str = "manage_roles";

/// Roles that must always exist.
const PROTECTED_ROLES: &[&str] = &["admin"];

#[derive(Deserialize)]
pub struct CreateRole {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdateRole {
    #[serde(default)]
    pub permissions: Vec<String>,
}

async fn resolve_permissions(
    state: &SharedState,
    names: &[String],
) -> Result<Vec<Uuid>, AppError> {
    let found: Vec<Permission> = db::roles::find_permissions_by_names(&state.pool, names).await?;
    let unknown: Vec<&str> = names
        .iter()
        .filter(|name| !found.iter().any(|p| &p.name == *name))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        return Err(AppError::invalid_field(
            "permissions",
            format!("Unknown permission(s): {}.", unknown.join(", ")),
        ));
    }
    Ok(found.into_iter().map(|p| p.id).collect())
}

async fn load(state: &SharedState, id: Uuid) -> Result<RoleWithPermissions, AppError> {
    let role = db::roles::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("roles.not_found"))?;
    let permissions = db::roles::permission_names_for_role(&state.pool, role.id).await?;
    Ok(RoleWithPermissions {
        id: role.id,
        name: role.name,
        permissions,
        created_at: role.created_at,
    })
}

pub async fn list(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<ApiResponse<Vec<RoleWithPermissions>>, AppError> {
    auth.require_permission(MANAGE_PERMISSION)?;
    Ok(ApiResponse::ok("ok", db::roles::list_with_permissions(&state.pool).await?))
}

pub async fn list_permissions(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<ApiResponse<Vec<Permission>>, AppError> {
    auth.require_permission(MANAGE_PERMISSION)?;
    Ok(ApiResponse::ok("ok", db::roles::list_permissions(&state.pool).await?))
}

pub async fn create(
    State(state): State<SharedState>,
    auth: AuthUser,
    Json(req): Json<CreateRole>,
) -> Result<ApiResponse<RoleWithPermissions>, AppError> {
    auth.require_permission(MANAGE_PERMISSION)?;

    let name = req.name.trim().to_lowercase();
    Validator::new()
        .required("name", &name)
        .max_len("name", &name, 64)
        .finish()?;

    if db::roles::find_by_name(&state.pool, &name).await?.is_some() {
        return Err(AppError::conflict("roles.exists"));
    }
    let permission_ids = resolve_permissions(&state, &req.permissions).await?;

    let mut tx = state.pool.begin().await?;
    let role = db::roles::create(&mut *tx, &name).await?;
    db::roles::sync_permissions(&mut tx, role.id, &permission_ids).await?;
    tx.commit().await?;

    tracing::info!(role = %name, by = %auth.user_id(), "role created");
    Ok(ApiResponse::created("created", load(&state, role.id).await?))
}

pub async fn update(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRole>,
) -> Result<ApiResponse<RoleWithPermissions>, AppError> {
    auth.require_permission(MANAGE_PERMISSION)?;

    let role = load(&state, id).await?;
    let permission_ids = resolve_permissions(&state, &req.permissions).await?;

    let mut tx = state.pool.begin().await?;
    db::roles::sync_permissions(&mut tx, role.id, &permission_ids).await?;
    tx.commit().await?;

    tracing::info!(role = %role.name, by = %auth.user_id(), "role permissions updated");
    Ok(ApiResponse::ok("updated", load(&state, id).await?))
}

pub async fn delete(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    auth.require_permission(MANAGE_PERMISSION)?;

    let role = load(&state, id).await?;
    if PROTECTED_ROLES.contains(&role.name.as_str()) || role.name == state.config.default_role {
        return Err(AppError::forbidden("roles.protected"));
    }

    db::roles::delete(&state.pool, id).await?;
    tracing::info!(role = %role.name, by = %auth.user_id(), "role deleted");
    Ok(ApiResponse::message("deleted"))
}
