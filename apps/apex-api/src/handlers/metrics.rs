//! 计数指标快照。
//!
//! - GET /metrics

use api_contract::{ApiResponse, MetricsSnapshotDto};
use apex_telemetry::metrics;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub async fn get_metrics() -> Response {
    let snapshot = metrics().snapshot();
    (
        StatusCode::OK,
        Json(ApiResponse::success(MetricsSnapshotDto {
            status_requests: snapshot.status_requests,
            status_empty: snapshot.status_empty,
            status_failures: snapshot.status_failures,
            status_latency_ms_total: snapshot.status_latency_ms_total,
            status_latency_ms_count: snapshot.status_latency_ms_count,
            dispatch_received: snapshot.dispatch_received,
            dispatch_accepted: snapshot.dispatch_accepted,
            dispatch_rejected: snapshot.dispatch_rejected,
            publish_legacy: snapshot.publish_legacy,
            publish_modern: snapshot.publish_modern,
        })),
    )
        .into_response()
}
