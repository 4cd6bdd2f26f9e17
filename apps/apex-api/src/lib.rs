//! 资产状态 HTTP 服务与井控监听装配。
//!
//! - `routes`：路由表（`/` 与 `/api/` 两种前缀）
//! - `handlers`：资产状态、健康检查、指标
//! - `stores`：按配置选择 PostgreSQL 或内存存储
//! - `control`：MQTT 入站 → 事务分发 → MQTT 出站

pub mod control;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod stores;
pub mod utils;

use apex_status::AssetStatusService;
use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub status: AssetStatusService,
    /// 进程退出时取消，进行中的聚合随之结束。
    pub shutdown: CancellationToken,
}

/// 组装完整应用（路由 + 请求上下文 + 追踪）。
pub fn build_app(state: AppState) -> Router {
    let api = routes::create_api_router();
    Router::new()
        .merge(api.clone())
        .nest("/api", api)
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::request_context))
        .layer(TraceLayer::new_for_http())
}
