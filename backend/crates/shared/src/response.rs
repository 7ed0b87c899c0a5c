//! Response envelope - JSON body shared by every endpoint
//!
//! Success: `{success: true, timestamp, data, [page, size, total]}`
//! Failure: `{success: false, timestamp, message}`

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 成功レスポンス
///
/// ## Examples
/// ```rust
/// use kernel::response::ApiResponse;
///
/// let res = ApiResponse::created(serde_json::json!({"id": 1}));
/// assert_eq!(res.status().as_u16(), 201);
/// ```
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    body: SuccessBody<T>,
}

#[derive(Debug, Serialize)]
struct SuccessBody<T> {
    success: bool,
    timestamp: DateTime<Utc>,
    data: T,
    #[serde(flatten)]
    page: Option<PageMeta>,
}

/// ページング情報
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: u32,
    pub size: u32,
    pub total: u64,
}

#[derive(Debug, Serialize)]
struct FailureBody<'a> {
    success: bool,
    timestamp: DateTime<Utc>,
    message: &'a str,
}

impl<T: Serialize> ApiResponse<T> {
    fn with_status(status: StatusCode, data: T) -> Self {
        Self {
            status,
            body: SuccessBody {
                success: true,
                timestamp: Utc::now(),
                data,
                page: None,
            },
        }
    }

    /// 200 OK
    pub fn ok(data: T) -> Self {
        Self::with_status(StatusCode::OK, data)
    }

    /// 201 Created
    pub fn created(data: T) -> Self {
        Self::with_status(StatusCode::CREATED, data)
    }

    /// 200 OK（ページング情報付き）
    pub fn paginated(data: T, page: u32, size: u32, total: u64) -> Self {
        let mut res = Self::ok(data);
        res.body.page = Some(PageMeta { page, size, total });
        res
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl ApiResponse<()> {
    /// 200 OK with `data: null`
    pub fn empty() -> Self {
        Self::ok(())
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// 失敗レスポンスを構築
pub fn failure(status: StatusCode, message: &str) -> Response {
    let body = FailureBody {
        success: false,
        timestamp: Utc::now(),
        message,
    };
    (status, Json(body)).into_response()
}
