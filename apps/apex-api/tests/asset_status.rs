use apex_api::stores::in_memory_stores;
use apex_api::{AppState, build_app};
use apex_protocol::RegexNodeAddressParser;
use apex_status::{AssetStatusService, StatusConfig, StatusStores};
use apex_storage::{CoreAssetRecord, InMemoryAssetStore};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;
use uuid::Uuid;

fn app_with_asset(asset_id: Uuid, shutdown: CancellationToken) -> axum::Router {
    let assets = Arc::new(InMemoryAssetStore::new());
    let mut record = CoreAssetRecord::new(asset_id, "WELL-01", 8);
    record.asset_name = "Well 1".to_string();
    record.application_id = Some(3);
    assets.insert_asset(record);

    let base = in_memory_stores().status;
    let stores = StatusStores { assets, ..base };
    let status = AssetStatusService::new(
        stores,
        Arc::new(RegexNodeAddressParser::new()),
        StatusConfig::default(),
    );
    build_app(AppState { status, shutdown })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn health_is_served_under_both_prefixes() {
    for uri in ["/health", "/api/health"] {
        let app = app_with_asset(Uuid::new_v4(), CancellationToken::new());
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }
}

#[tokio::test]
async fn asset_status_returns_aggregate() {
    let asset_id = Uuid::new_v4();
    let app = app_with_asset(asset_id, CancellationToken::new());
    let request = Request::builder()
        .uri(format!("/api/assets/{asset_id}/status"))
        .header("x-user-id", "user-1")
        .header("x-correlation-id", "corr-42")
        .body(Body::empty())
        .expect("request");

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["correlationId"], "corr-42");
    assert_eq!(json["data"]["values"]["assetName"], "Well 1");
    assert_eq!(json["data"]["values"]["diagramType"], "RodLift");
    assert_eq!(json["data"]["values"]["refreshIntervalSeconds"], 15);
}

#[tokio::test]
async fn missing_user_yields_empty_values() {
    let asset_id = Uuid::new_v4();
    let app = app_with_asset(asset_id, CancellationToken::new());
    let request = Request::builder()
        .uri(format!("/assets/{asset_id}/status"))
        .body(Body::empty())
        .expect("request");

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["values"].is_null());
    assert!(
        json["data"]["correlationId"]
            .as_str()
            .is_some_and(|id| !id.is_empty())
    );
}

#[tokio::test]
async fn invalid_asset_id_is_bad_request() {
    let app = app_with_asset(Uuid::new_v4(), CancellationToken::new());
    let request = Request::builder()
        .uri("/assets/not-a-guid/status")
        .header("x-user-id", "user-1")
        .body(Body::empty())
        .expect("request");

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INVALID.REQUEST");
}

#[tokio::test]
async fn shutdown_cancels_in_flight_requests() {
    let asset_id = Uuid::new_v4();
    let shutdown = CancellationToken::new();
    shutdown.cancel();
    let app = app_with_asset(asset_id, shutdown);
    let request = Request::builder()
        .uri(format!("/assets/{asset_id}/status"))
        .header("x-user-id", "user-1")
        .body(Body::empty())
        .expect("request");

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "STATUS.CANCELLED");
}
