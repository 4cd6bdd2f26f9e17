//! HTTP 错误响应
//!
//! 所有错误返回统一的 ApiResponse 格式，HTTP 状态码与错误码对应。

use api_contract::ApiResponse;
use apex_status::StatusError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 资产状态聚合错误响应
pub fn status_error(err: StatusError) -> Response {
    let message = err.to_string();
    match err {
        StatusError::Cancelled => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::<()>::error("STATUS.CANCELLED", message)),
        )
            .into_response(),
        StatusError::Storage(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error("INTERNAL.ERROR", message)),
        )
            .into_response(),
    }
}
