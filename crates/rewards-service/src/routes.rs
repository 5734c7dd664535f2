//! 路由配置模块

use std::time::Duration;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, put},
};
use tower_http::timeout::TimeoutLayer;

use crate::{handlers, state::AppState};

/// 积分相关的全部路由
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/rewards", get(handlers::rewards::list_rewards))
        .route(
            "/customer_rewards",
            put(handlers::customer_rewards::accrue_rewards)
                .get(handlers::customer_rewards::list_customer_rewards),
        )
        .route(
            "/customer_rewards/{customer_id}",
            get(handlers::customer_rewards::get_customer_rewards),
        )
}

/// 请求超时层，超时返回 408
pub fn request_timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}
