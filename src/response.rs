use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::messages::t;

/// Success envelope: `{"status": "success", "message": ..., "data": ...}`.
pub struct ApiResponse<T> {
    code: StatusCode,
    message: String,
    data: Option<T>,
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    status: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(key: &str, data: T) -> Self {
        Self {
            code: StatusCode::OK,
            message: t(key),
            data: Some(data),
        }
    }

    pub fn created(key: &str, data: T) -> Self {
        Self {
            code: StatusCode::CREATED,
            message: t(key),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(key: &str) -> Self {
        Self {
            code: StatusCode::OK,
            message: t(key),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = Envelope {
            status: "success",
            message: &self.message,
            data: self.data.as_ref(),
        };
        (self.code, Json(body)).into_response()
    }
}

/// One page of a listing.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// Normalizes `page`/`per_page` query values into `(page, per_page, offset)`.
pub fn page_bounds(page: Option<i64>, per_page: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(20).clamp(1, 100);
    (page, per_page, (page - 1) * per_page)
}
