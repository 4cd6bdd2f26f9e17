//! 追踪、请求 ID 生成与基础计数指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 基础指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub status_requests: u64,
    pub status_empty: u64,
    pub status_failures: u64,
    pub status_latency_ms_total: u64,
    pub status_latency_ms_count: u64,
    pub dispatch_received: u64,
    pub dispatch_accepted: u64,
    pub dispatch_rejected: u64,
    pub publish_legacy: u64,
    pub publish_modern: u64,
}

/// 基础指标。
pub struct TelemetryMetrics {
    status_requests: AtomicU64,
    status_empty: AtomicU64,
    status_failures: AtomicU64,
    status_latency_ms_total: AtomicU64,
    status_latency_ms_count: AtomicU64,
    dispatch_received: AtomicU64,
    dispatch_accepted: AtomicU64,
    dispatch_rejected: AtomicU64,
    publish_legacy: AtomicU64,
    publish_modern: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            status_requests: AtomicU64::new(0),
            status_empty: AtomicU64::new(0),
            status_failures: AtomicU64::new(0),
            status_latency_ms_total: AtomicU64::new(0),
            status_latency_ms_count: AtomicU64::new(0),
            dispatch_received: AtomicU64::new(0),
            dispatch_accepted: AtomicU64::new(0),
            dispatch_rejected: AtomicU64::new(0),
            publish_legacy: AtomicU64::new(0),
            publish_modern: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            status_requests: self.status_requests.load(Ordering::Relaxed),
            status_empty: self.status_empty.load(Ordering::Relaxed),
            status_failures: self.status_failures.load(Ordering::Relaxed),
            status_latency_ms_total: self.status_latency_ms_total.load(Ordering::Relaxed),
            status_latency_ms_count: self.status_latency_ms_count.load(Ordering::Relaxed),
            dispatch_received: self.dispatch_received.load(Ordering::Relaxed),
            dispatch_accepted: self.dispatch_accepted.load(Ordering::Relaxed),
            dispatch_rejected: self.dispatch_rejected.load(Ordering::Relaxed),
            publish_legacy: self.publish_legacy.load(Ordering::Relaxed),
            publish_modern: self.publish_modern.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 生成关联 ID（调用方未提供时使用）。
pub fn new_correlation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录资产状态请求次数。
pub fn record_status_request() {
    metrics().status_requests.fetch_add(1, Ordering::Relaxed);
}

/// 记录空结果次数。
pub fn record_status_empty() {
    metrics().status_empty.fetch_add(1, Ordering::Relaxed);
}

/// 记录聚合失败次数。
pub fn record_status_failure() {
    metrics().status_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录聚合延迟（毫秒）。
pub fn record_status_latency_ms(latency_ms: u64) {
    let metrics = metrics();
    metrics
        .status_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .status_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录收到的变更事件次数。
pub fn record_dispatch_received() {
    metrics().dispatch_received.fetch_add(1, Ordering::Relaxed);
}

/// 记录成功分发次数。
pub fn record_dispatch_accepted() {
    metrics().dispatch_accepted.fetch_add(1, Ordering::Relaxed);
}

/// 记录拒绝次数。
pub fn record_dispatch_rejected() {
    metrics().dispatch_rejected.fetch_add(1, Ordering::Relaxed);
}

/// 记录旧版通道发布次数。
pub fn record_publish_legacy() {
    metrics().publish_legacy.fetch_add(1, Ordering::Relaxed);
}

/// 记录新版微服务发布次数。
pub fn record_publish_modern() {
    metrics().publish_modern.fetch_add(1, Ordering::Relaxed);
}
