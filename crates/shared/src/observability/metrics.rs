//! Prometheus 指标模块
//!
//! 基于 metrics crate 和 metrics-exporter-prometheus 实现指标收集与导出。
//! 指标通过独立的 HTTP 端口暴露，供 Prometheus 抓取。
//! 未安装 recorder 时（如单元测试）所有记录函数均为空操作。

use anyhow::Result;
use axum::{Router, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Metrics 资源守卫
pub struct MetricsHandle {
    _server_handle: tokio::task::JoinHandle<()>,
}

/// 初始化 Prometheus 指标导出
///
/// 启动一个独立的 HTTP 服务器在指定端口暴露 `/metrics` 端点。
pub async fn init(service_name: &str, port: u16) -> Result<MetricsHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    register_common_metrics(service_name);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let server_handle = start_metrics_server(addr, handle).await?;

    Ok(MetricsHandle {
        _server_handle: server_handle,
    })
}

/// 注册通用指标描述
fn register_common_metrics(service_name: &str) {
    metrics::describe_counter!("http_requests_total", "Total number of HTTP requests");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );

    metrics::describe_counter!(
        "rewards_accruals_total",
        "Total number of point accrual requests"
    );
    metrics::describe_histogram!(
        "rewards_accrual_duration_seconds",
        "Point accrual duration in seconds"
    );
    metrics::describe_counter!(
        "rewards_points_awarded_total",
        "Total points awarded from orders"
    );
    metrics::describe_gauge!(
        "rewards_tier_table_size",
        "Number of tiers in the loaded tier table"
    );
    metrics::describe_counter!(
        "rewards_tier_refresh_total",
        "Total number of tier table refresh attempts"
    );

    metrics::counter!("service_starts_total", "service" => service_name.to_string()).increment(1);
}

/// 启动指标 HTTP 服务器
async fn start_metrics_server(
    addr: SocketAddr,
    handle: PrometheusHandle,
) -> Result<tokio::task::JoinHandle<()>> {
    let app = Router::new()
        .route("/metrics", get(move || std::future::ready(handle.render())))
        .route("/health", get(|| async { "OK" }));

    let listener = TcpListener::bind(addr).await?;
    info!("Metrics server listening on {}", addr);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Metrics server error: {}", e);
        }
    });

    Ok(server_handle)
}

// ============================================================================
// 指标记录函数
// ============================================================================

/// 记录 HTTP 请求
#[inline]
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

/// 记录一次积分累计
///
/// `status` 取值：success / validation_error / storage_error
#[inline]
pub fn record_accrual(status: &str, duration_secs: f64) {
    metrics::counter!("rewards_accruals_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("rewards_accrual_duration_seconds").record(duration_secs);
}

/// 记录订单折算的积分（负值订单不计入）
#[inline]
pub fn record_points_awarded(points: i64) {
    if points > 0 {
        metrics::counter!("rewards_points_awarded_total").increment(points as u64);
    }
}

/// 设置当前等级表大小
#[inline]
pub fn set_tier_table_size(size: usize) {
    metrics::gauge!("rewards_tier_table_size").set(size as f64);
}

/// 记录等级表刷新结果
#[inline]
pub fn record_tier_refresh(status: &str) {
    metrics::counter!("rewards_tier_refresh_total", "status" => status.to_string()).increment(1);
}
