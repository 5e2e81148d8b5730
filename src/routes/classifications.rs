use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{Classification, CLASSIFICATION_STATUSES};
use crate::response::{page_bounds, ApiResponse, Paginated};
use crate::state::SharedState;
use crate::validation::Validator;

pub const VIEW_PERMISSION: &str = "view_classifications";

#[derive(Deserialize)]
pub struct SubmitImage {
    #[serde(default)]
    pub image: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub user_id: Option<Uuid>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl ListQuery {
    fn status(&self) -> Result<Option<&str>, AppError> {
        match self.status.as_deref().filter(|s| !s.is_empty()) {
            Some(s) if !CLASSIFICATION_STATUSES.contains(&s) => Err(AppError::invalid_field(
                "status",
                format!("The status must be one of: {}.", CLASSIFICATION_STATUSES.join(", ")),
            )),
            other => Ok(other),
        }
    }
}

/// Registers an already-stored image for the external classifier.
pub async fn submit(
    State(state): State<SharedState>,
    auth: AuthUser,
    Json(req): Json<SubmitImage>,
) -> Result<ApiResponse<Classification>, AppError> {
    let image = req.image.trim();
    Validator::new()
        .required("image", image)
        .max_len("image", image, 2048)
        .finish()?;

    let row = db::classifications::create(&state.pool, auth.user_id(), image).await?;
    tracing::info!(id = %row.id, user_id = %auth.user_id(), "image queued for classification");
    Ok(ApiResponse::created("created", row))
}

pub async fn list_own(
    State(state): State<SharedState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<ApiResponse<Paginated<Classification>>, AppError> {
    let (page, per_page, offset) = page_bounds(query.page, query.per_page);
    let (items, total) = db::classifications::list(
        &state.pool,
        Some(auth.user_id()),
        query.status()?,
        per_page,
        offset,
    )
    .await?;

    Ok(ApiResponse::ok("ok", Paginated { items, total, page, per_page }))
}

pub async fn get_own(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Classification>, AppError> {
    let row = db::classifications::find_by_id(&state.pool, id)
        .await?
        .filter(|row| row.user_id == auth.user_id())
        .ok_or_else(|| AppError::not_found("classifications.not_found"))?;
    Ok(ApiResponse::ok("ok", row))
}

pub async fn admin_list(
    State(state): State<SharedState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<ApiResponse<Paginated<Classification>>, AppError> {
    auth.require_permission(VIEW_PERMISSION)?;

    let (page, per_page, offset) = page_bounds(query.page, query.per_page);
    let (items, total) =
        db::classifications::list(&state.pool, query.user_id, query.status()?, per_page, offset)
            .await?;

    Ok(ApiResponse::ok("ok", Paginated { items, total, page, per_page }))
}

pub async fn admin_get(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Classification>, AppError> {
    auth.require_permission(VIEW_PERMISSION)?;

    let row = db::classifications::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("classifications.not_found"))?;
    Ok(ApiResponse::ok("ok", row))
}
