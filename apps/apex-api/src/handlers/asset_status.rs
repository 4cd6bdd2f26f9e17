//! 资产状态查询 handlers
//!
//! - GET /assets/{asset_id}/status
//!
//! 调用用户取自 `x-user-id`，关联 ID 取自 `x-correlation-id`（缺失时生成）。

use crate::AppState;
use crate::utils::response::{bad_request_error, status_error};
use api_contract::ApiResponse;
use apex_telemetry::new_correlation_id;
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use domain::AssetStatusRequest;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

pub async fn get_asset_status(
    State(state): State<AppState>,
    Path(asset_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let Ok(asset_id) = uuid::Uuid::parse_str(asset_id.trim()) else {
        return bad_request_error("invalid asset id");
    };
    let user_id = header_value(&headers, USER_ID_HEADER);
    let correlation_id =
        header_value(&headers, CORRELATION_ID_HEADER).unwrap_or_else(new_correlation_id);
    let request = AssetStatusRequest::new(asset_id, user_id, correlation_id);

    let cancel = state.shutdown.child_token();
    match state.status.get_asset_status(Some(&request), &cancel).await {
        Ok(Some(response)) => {
            (StatusCode::OK, Json(ApiResponse::success(response))).into_response()
        }
        Ok(None) => bad_request_error("request required"),
        Err(err) => status_error(err),
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn blank_headers_are_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("  "));
        headers.insert(CORRELATION_ID_HEADER, HeaderValue::from_static(" corr-9 "));
        assert_eq!(header_value(&headers, USER_ID_HEADER), None);
        assert_eq!(
            header_value(&headers, CORRELATION_ID_HEADER).as_deref(),
            Some("corr-9")
        );
    }
}
