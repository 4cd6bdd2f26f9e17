//! Handlers 模块

pub mod asset_status;
pub mod metrics;

pub use asset_status::*;
pub use metrics::*;

use axum::{Json, response::IntoResponse};

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}
