use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{Feedback, FeedbackEntry};
use crate::response::{page_bounds, ApiResponse, Paginated};
use crate::state::SharedState;
use crate::validation::Validator;

pub const VIEW_PERMISSION: &str = "view_feedback";

#[derive(Deserialize)]
pub struct CreateFeedback {
    #[serde(default)]
    pub content: String,
    pub rating: Option<i16>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

pub async fn create(
    State(state): State<SharedState>,
    auth: AuthUser,
    Json(req): Json<CreateFeedback>,
) -> Result<ApiResponse<Feedback>, AppError> {
    let content = req.content.trim();

    let mut v = Validator::new();
    v.required("content", content).max_len("content", content, 5000);
    if let Some(rating) = req.rating {
        if !(1..=5).contains(&rating) {
            v.add("rating", "The rating must be between 1 and 5.");
        }
    }
    v.finish()?;

    let feedback = db::feedback::create(&state.pool, auth.user_id(), content, req.rating).await?;
    Ok(ApiResponse::created("created", feedback))
}

pub async fn list(
    State(state): State<SharedState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<ApiResponse<Paginated<FeedbackEntry>>, AppError> {
    auth.require_permission(VIEW_PERMISSION)?;

    let (page, per_page, offset) = page_bounds(query.page, query.per_page);
    let (items, total) = db::feedback::list(&state.pool, per_page, offset).await?;

    Ok(ApiResponse::ok(
        "ok",
        Paginated {
            items,
            total,
            page,
            per_page,
        },
    ))
}

pub async fn delete(
    State(state): State<SharedState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    auth.require_permission(VIEW_PERMISSION)?;

    if !db::feedback::delete(&state.pool, id).await? {
        return Err(AppError::not_found("feedback.not_found"));
    }
    Ok(ApiResponse::message("deleted"))
}
