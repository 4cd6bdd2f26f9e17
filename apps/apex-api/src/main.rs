use apex_api::control::spawn_control;
use apex_api::stores::build_stores;
use apex_api::{AppState, build_app};
use apex_config::AppConfig;
use apex_protocol::{NodeAddressParser, RegexNodeAddressParser};
use apex_status::{AssetStatusService, StatusConfig};
use apex_telemetry::init_tracing;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    let stores = build_stores(&config).await?;
    let parser: Arc<dyn NodeAddressParser> = Arc::new(RegexNodeAddressParser::new());
    let status = AssetStatusService::new(
        stores.status.clone(),
        parser.clone(),
        StatusConfig {
            refresh_interval_seconds: config.asset_status_refresh_interval_seconds,
            smarten_api_port: config.smarten_api_port,
        },
    );

    let control_handles = if config.control_enabled {
        spawn_control(&config, &stores, parser)?
    } else {
        info!(target: "apex.api", "control_listener_disabled");
        Vec::new()
    };

    let shutdown = CancellationToken::new();
    let app = build_app(AppState {
        status,
        shutdown: shutdown.clone(),
    });

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(target: "apex.api", addr = %config.http_addr, "http_listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    for handle in control_handles {
        handle.abort();
    }
    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(target: "apex.api", error = %err, "shutdown_signal_failed");
    }
    info!(target: "apex.api", "shutdown_requested");
    shutdown.cancel();
}
