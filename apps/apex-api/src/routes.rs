//! 路由定义
//!
//! - 健康检查：/health
//! - 指标：/metrics
//! - 资产状态：/assets/{asset_id}/status

use crate::AppState;
use crate::handlers::*;
use axum::{Router, routing::get};

/// 创建 API 路由
///
/// 由 `build_app` 同时挂载在 / 与 /api/ 下。
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(get_metrics))
        .route("/assets/:asset_id/status", get(get_asset_status))
}
