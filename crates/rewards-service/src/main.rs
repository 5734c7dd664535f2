//! 客户积分服务
//!
//! 提供等级查询、订单积分累计与客户积分查询的 REST API。

use std::sync::Arc;
use std::time::Duration;

use axum::{Json, Router, http::HeaderValue, middleware, routing::get};
use rewards_service::{
    RewardsService, ServiceSettings, TierCatalog,
    repository::{
        CustomerRewardsRepositoryTrait, PgCustomerRewardsRepository, PgTierRepository,
        TierRepositoryTrait,
    },
    routes,
    state::AppState,
    worker::TierRefreshWorker,
};
use rewards_shared::{
    config::AppConfig,
    database::Database,
    observability::{self, middleware as obs_middleware},
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

const SERVICE_NAME: &str = "rewards-service";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载配置，失败时退回默认值
    let config = AppConfig::load(SERVICE_NAME).unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {e}");
        AppConfig::default()
    });

    // 2. 可观测性
    let _guard = observability::init(&config.service_name, &config.observability).await?;

    info!(
        environment = %config.environment,
        addr = %config.server_addr(),
        "Starting rewards-service"
    );

    // 3. 数据库与迁移
    let db = Database::connect(&config.database).await?;
    db.run_migrations().await?;

    // 4. 仓储
    let tier_repo: Arc<dyn TierRepositoryTrait> =
        Arc::new(PgTierRepository::new(db.pool().clone()));
    let customer_repo: Arc<dyn CustomerRewardsRepositoryTrait> =
        Arc::new(PgCustomerRewardsRepository::new(db.pool().clone()));

    // 5. 等级表首次加载，加载失败则不启动
    let catalog = Arc::new(TierCatalog::new(tier_repo, config.rewards.store_timeout()));
    catalog.load().await?;

    match config.rewards.tier_refresh_interval() {
        Some(interval) => {
            let worker = TierRefreshWorker::new(catalog.clone(), interval);
            tokio::spawn(async move { worker.run().await });
        }
        None => info!("Tier table refresh disabled, using startup snapshot"),
    }

    // 6. 服务与路由
    let rewards = Arc::new(RewardsService::new(
        customer_repo,
        catalog,
        ServiceSettings::from(&config.rewards),
    ));
    let state = AppState::new(rewards);

    let cors = build_cors(&config);

    let app = Router::new()
        .merge(routes::api_routes())
        .route("/health", get(health_check))
        .route(
            "/ready",
            get({
                let db_for_ready = db.clone();
                move || readiness_check(db_for_ready.clone())
            }),
        )
        .layer(routes::request_timeout_layer(Duration::from_secs(
            config.server.request_timeout_seconds,
        )))
        .layer(cors)
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state);

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 优雅关闭：停止接收新连接并等待已有请求处理完毕
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");

    Ok(())
}

/// CORS 配置：`*` 放行全部来源，否则按逗号分隔的来源列表放行
fn build_cors(config: &AppConfig) -> CorsLayer {
    let allowed_origins = config.server.cors_origins.trim();

    if allowed_origins == "*" {
        if config.is_production() {
            warn!("cors_origins=\"*\" 在生产环境中不安全，请设置为具体域名");
        }
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        info!("CORS allowed_origins: {}", allowed_origins);
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .filter_map(|s| s.trim().parse::<HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// 监听关闭信号（Ctrl+C 或 SIGTERM）
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}

/// 存活探针
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}

/// 就绪探针：检查数据库连接
async fn readiness_check(db: Database) -> Json<serde_json::Value> {
    let db_ok = db.health_check().await.is_ok();

    Json(serde_json::json!({
        "status": if db_ok { "ok" } else { "degraded" },
        "service": SERVICE_NAME,
        "checks": {
            "database": if db_ok { "ok" } else { "fail" }
        }
    }))
}
