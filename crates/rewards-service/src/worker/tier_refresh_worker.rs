//! 等级表定时刷新 Worker
//!
//! 按固定间隔重新读取等级表，运营在存储侧调整等级后无需重启服务即可生效。
//! 刷新失败只记录告警，继续使用上一份快照。

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::tier_catalog::TierCatalog;

/// 默认刷新间隔（5 分钟）
const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// 等级表刷新 Worker
pub struct TierRefreshWorker {
    catalog: Arc<TierCatalog>,
    interval: Duration,
}

impl TierRefreshWorker {
    pub fn new(catalog: Arc<TierCatalog>, interval: Duration) -> Self {
        Self { catalog, interval }
    }

    pub fn with_defaults(catalog: Arc<TierCatalog>) -> Self {
        Self::new(catalog, DEFAULT_REFRESH_INTERVAL)
    }

    /// 主循环：先等待一个间隔再刷新，直到进程退出
    ///
    /// 首次加载由启动流程完成，这里不重复
    pub async fn run(&self) {
        info!(interval = ?self.interval, "TierRefreshWorker started");
        loop {
            tokio::time::sleep(self.interval).await;
            self.tick().await;
        }
    }

    /// 执行一次刷新
    pub async fn tick(&self) {
        if let Err(e) = self.catalog.refresh().await {
            warn!(error = %e, "Tier table refresh failed, keeping previous snapshot");
        }
    }
}
